pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_tables;
mod m20250602_000001_lesson_materials_policies;
mod m20250602_000002_assignments_bucket_policies;
pub mod rls;

pub use m20250602_000001_lesson_materials_policies::BUCKET_ID as LESSON_MATERIALS_BUCKET;
pub use m20250602_000002_assignments_bucket_policies::BUCKET_ID as ASSIGNMENTS_BUCKET;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_tables::Migration),
            Box::new(m20250602_000001_lesson_materials_policies::Migration),
            Box::new(m20250602_000002_assignments_bucket_policies::Migration),
        ]
    }
}
