use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户资料表
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Profiles::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Profiles::DisplayName).string().not_null())
                    .col(ColumnDef::new(Profiles::Role).string().not_null())
                    .col(ColumnDef::new(Profiles::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建课程表
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::Title).string().not_null())
                    .col(
                        ColumnDef::new(Courses::CurrentPhase)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Courses::TutorId).string().null())
                    .col(ColumnDef::new(Courses::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Courses::Table, Courses::TutorId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建作业表
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assignments::CourseId).string().not_null())
                    .col(
                        ColumnDef::new(Assignments::PhaseNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assignments::Title).string().not_null())
                    .col(ColumnDef::new(Assignments::Description).text().null())
                    .col(ColumnDef::new(Assignments::DueDays).integer().null())
                    .col(ColumnDef::new(Assignments::MaxScore).double().null())
                    .col(
                        ColumnDef::new(Assignments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建作业提交表
        manager
            .create_table(
                Table::create()
                    .table(AssignmentSubmissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssignmentSubmissions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::AssignmentId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::StudentId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::SubmissionText)
                            .text()
                            .null(),
                    )
                    .col(ColumnDef::new(AssignmentSubmissions::Score).double().null())
                    .col(ColumnDef::new(AssignmentSubmissions::Feedback).text().null())
                    .col(
                        ColumnDef::new(AssignmentSubmissions::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::SubmittedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::GradedAt)
                            .big_integer()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                AssignmentSubmissions::Table,
                                AssignmentSubmissions::AssignmentId,
                            )
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                AssignmentSubmissions::Table,
                                AssignmentSubmissions::StudentId,
                            )
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建课程资料表
        manager
            .create_table(
                Table::create()
                    .table(LessonMaterials::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LessonMaterials::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LessonMaterials::CourseId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LessonMaterials::Title).string().not_null())
                    .col(
                        ColumnDef::new(LessonMaterials::ObjectPath)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LessonMaterials::UploadedBy)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LessonMaterials::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(LessonMaterials::Table, LessonMaterials::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建存储桶表
        manager
            .create_table(
                Table::create()
                    .table(StorageBuckets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StorageBuckets::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StorageBuckets::Public)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建存储对象表
        manager
            .create_table(
                Table::create()
                    .table(StorageObjects::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(StorageObjects::BucketId).string().not_null())
                    .col(ColumnDef::new(StorageObjects::Name).string().not_null())
                    .col(ColumnDef::new(StorageObjects::OwnerId).string().null())
                    .col(ColumnDef::new(StorageObjects::Size).big_integer().not_null())
                    .col(
                        ColumnDef::new(StorageObjects::ContentType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StorageObjects::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(StorageObjects::BucketId)
                            .col(StorageObjects::Name),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StorageObjects::Table, StorageObjects::BucketId)
                            .to(StorageBuckets::Table, StorageBuckets::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assignments_course_phase")
                    .table(Assignments::Table)
                    .col(Assignments::CourseId)
                    .col(Assignments::PhaseNumber)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assignment_submissions_student")
                    .table(AssignmentSubmissions::Table)
                    .col(AssignmentSubmissions::StudentId)
                    .to_owned(),
            )
            .await?;

        // 每个学生每个作业最多一份提交
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_assignment_submissions_assignment_student")
                    .table(AssignmentSubmissions::Table)
                    .col(AssignmentSubmissions::AssignmentId)
                    .col(AssignmentSubmissions::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_lesson_materials_course")
                    .table(LessonMaterials::Table)
                    .col(LessonMaterials::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StorageObjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StorageBuckets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LessonMaterials::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AssignmentSubmissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
    DisplayName,
    Role,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Courses {
    Table,
    Id,
    Title,
    CurrentPhase,
    TutorId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Assignments {
    Table,
    Id,
    CourseId,
    PhaseNumber,
    Title,
    Description,
    DueDays,
    MaxScore,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AssignmentSubmissions {
    Table,
    Id,
    AssignmentId,
    StudentId,
    SubmissionText,
    Score,
    Feedback,
    Status,
    SubmittedAt,
    GradedAt,
}

#[derive(DeriveIden)]
enum LessonMaterials {
    Table,
    Id,
    CourseId,
    Title,
    ObjectPath,
    UploadedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum StorageBuckets {
    Table,
    Id,
    Public,
}

#[derive(DeriveIden)]
enum StorageObjects {
    Table,
    BucketId,
    Name,
    OwnerId,
    Size,
    ContentType,
    CreatedAt,
}
