//! 预导入模块，方便使用

pub use super::assignment_submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::lesson_materials::{
    ActiveModel as LessonMaterialActiveModel, Entity as LessonMaterials,
    Model as LessonMaterialModel,
};
pub use super::profiles::{
    ActiveModel as ProfileActiveModel, Entity as Profiles, Model as ProfileModel,
};
pub use super::storage_buckets::{Entity as StorageBuckets, Model as StorageBucketModel};
pub use super::storage_objects::{
    ActiveModel as StorageObjectActiveModel, Entity as StorageObjects,
    Model as StorageObjectModel,
};
