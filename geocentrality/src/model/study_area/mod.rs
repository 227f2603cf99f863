mod study_area;
mod study_area_error;

pub use study_area::StudyArea;
pub use study_area_error::StudyAreaError;
