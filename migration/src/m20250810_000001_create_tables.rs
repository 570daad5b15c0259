use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建测评表
        manager
            .create_table(
                Table::create()
                    .table(Assessments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assessments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assessments::SchoolId).big_integer().not_null())
                    .col(ColumnDef::new(Assessments::SubjectId).big_integer().not_null())
                    .col(ColumnDef::new(Assessments::TopicId).big_integer().null())
                    .col(ColumnDef::new(Assessments::Title).string().not_null())
                    .col(ColumnDef::new(Assessments::Description).text().null())
                    .col(ColumnDef::new(Assessments::Instructions).text().null())
                    .col(
                        ColumnDef::new(Assessments::AssessmentType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assessments::GradingMode).string().not_null())
                    .col(ColumnDef::new(Assessments::Status).string().not_null())
                    .col(ColumnDef::new(Assessments::StartsAt).big_integer().null())
                    .col(ColumnDef::new(Assessments::EndsAt).big_integer().null())
                    .col(ColumnDef::new(Assessments::AttemptLimit).integer().null())
                    .col(ColumnDef::new(Assessments::PassingScore).double().null())
                    .col(
                        ColumnDef::new(Assessments::TotalPoints)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Assessments::ShuffleQuestions)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Assessments::ShowCorrectAnswers)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Assessments::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Assessments::PublishedAt).big_integer().null())
                    .col(
                        ColumnDef::new(Assessments::IsResultReleased)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Assessments::ResultReleasedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Assessments::CreatedBy).big_integer().not_null())
                    .col(ColumnDef::new(Assessments::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Assessments::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建题目表
        manager
            .create_table(
                Table::create()
                    .table(Questions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Questions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Questions::AssessmentId).big_integer().not_null())
                    .col(ColumnDef::new(Questions::Text).text().not_null())
                    .col(ColumnDef::new(Questions::QuestionType).string().not_null())
                    .col(ColumnDef::new(Questions::SortOrder).integer().not_null())
                    .col(ColumnDef::new(Questions::Points).double().not_null())
                    .col(
                        ColumnDef::new(Questions::Required)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Questions::TimeLimit).integer().null())
                    .col(ColumnDef::new(Questions::ImageUrl).string().null())
                    .col(ColumnDef::new(Questions::ImageKey).string().null())
                    .col(ColumnDef::new(Questions::Hint).text().null())
                    .col(ColumnDef::new(Questions::Explanation).text().null())
                    .col(ColumnDef::new(Questions::Difficulty).string().null())
                    .col(ColumnDef::new(Questions::MinLength).integer().null())
                    .col(ColumnDef::new(Questions::MaxLength).integer().null())
                    .col(ColumnDef::new(Questions::MinValue).double().null())
                    .col(ColumnDef::new(Questions::MaxValue).double().null())
                    .col(ColumnDef::new(Questions::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Questions::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Questions::Table, Questions::AssessmentId)
                            .to(Assessments::Table, Assessments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建选项表
        manager
            .create_table(
                Table::create()
                    .table(QuestionOptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuestionOptions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(QuestionOptions::QuestionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(QuestionOptions::Text).text().not_null())
                    .col(ColumnDef::new(QuestionOptions::SortOrder).integer().not_null())
                    .col(
                        ColumnDef::new(QuestionOptions::IsCorrect)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(QuestionOptions::ImageUrl).string().null())
                    .col(ColumnDef::new(QuestionOptions::ImageKey).string().null())
                    .col(
                        ColumnDef::new(QuestionOptions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(QuestionOptions::Table, QuestionOptions::QuestionId)
                            .to(Questions::Table, Questions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建标准答案表
        manager
            .create_table(
                Table::create()
                    .table(CorrectAnswers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CorrectAnswers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CorrectAnswers::QuestionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CorrectAnswers::AnswerText).text().null())
                    .col(ColumnDef::new(CorrectAnswers::AnswerNumber).double().null())
                    .col(ColumnDef::new(CorrectAnswers::AnswerDate).big_integer().null())
                    .col(ColumnDef::new(CorrectAnswers::OptionIds).text().null())
                    .col(ColumnDef::new(CorrectAnswers::AnswerPayload).text().null())
                    .col(
                        ColumnDef::new(CorrectAnswers::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CorrectAnswers::Table, CorrectAnswers::QuestionId)
                            .to(Questions::Table, Questions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建答题记录表（由答题运行时写入，本引擎只读）
        manager
            .create_table(
                Table::create()
                    .table(Attempts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attempts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Attempts::AssessmentId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Attempts::ParticipantId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Attempts::AttemptNumber).integer().not_null())
                    .col(ColumnDef::new(Attempts::Status).string().not_null())
                    .col(ColumnDef::new(Attempts::Score).double().null())
                    .col(ColumnDef::new(Attempts::Percentage).double().null())
                    .col(ColumnDef::new(Attempts::Passed).boolean().null())
                    .col(ColumnDef::new(Attempts::StartedAt).big_integer().not_null())
                    .col(ColumnDef::new(Attempts::SubmittedAt).big_integer().null())
                    .col(ColumnDef::new(Attempts::TimeSpent).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Attempts::Table, Attempts::AssessmentId)
                            .to(Assessments::Table, Assessments::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建作答表（单题作答，由答题运行时写入，本引擎只读）
        manager
            .create_table(
                Table::create()
                    .table(Responses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Responses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Responses::AttemptId).big_integer().not_null())
                    .col(ColumnDef::new(Responses::QuestionId).big_integer().not_null())
                    .col(ColumnDef::new(Responses::Answer).text().null())
                    .col(ColumnDef::new(Responses::Score).double().null())
                    .col(ColumnDef::new(Responses::IsCorrect).boolean().null())
                    .col(ColumnDef::new(Responses::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Responses::Table, Responses::AttemptId)
                            .to(Attempts::Table, Attempts::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Responses::Table, Responses::QuestionId)
                            .to(Questions::Table, Questions::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 常用查询索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_questions_assessment_sort")
                    .table(Questions::Table)
                    .col(Questions::AssessmentId)
                    .col(Questions::SortOrder)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attempts_assessment")
                    .table(Attempts::Table)
                    .col(Attempts::AssessmentId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attempts_participant")
                    .table(Attempts::Table)
                    .col(Attempts::ParticipantId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_responses_question")
                    .table(Responses::Table)
                    .col(Responses::QuestionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Responses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Attempts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CorrectAnswers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(QuestionOptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Questions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assessments::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Assessments {
    #[sea_orm(iden = "assessments")]
    Table,
    Id,
    SchoolId,
    SubjectId,
    TopicId,
    Title,
    Description,
    Instructions,
    AssessmentType,
    GradingMode,
    Status,
    StartsAt,
    EndsAt,
    AttemptLimit,
    PassingScore,
    TotalPoints,
    ShuffleQuestions,
    ShowCorrectAnswers,
    IsPublished,
    PublishedAt,
    IsResultReleased,
    ResultReleasedAt,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Questions {
    #[sea_orm(iden = "questions")]
    Table,
    Id,
    AssessmentId,
    Text,
    QuestionType,
    SortOrder,
    Points,
    Required,
    TimeLimit,
    ImageUrl,
    ImageKey,
    Hint,
    Explanation,
    Difficulty,
    MinLength,
    MaxLength,
    MinValue,
    MaxValue,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum QuestionOptions {
    #[sea_orm(iden = "question_options")]
    Table,
    Id,
    QuestionId,
    Text,
    SortOrder,
    IsCorrect,
    ImageUrl,
    ImageKey,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CorrectAnswers {
    #[sea_orm(iden = "correct_answers")]
    Table,
    Id,
    QuestionId,
    AnswerText,
    AnswerNumber,
    AnswerDate,
    OptionIds,
    AnswerPayload,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Attempts {
    #[sea_orm(iden = "attempts")]
    Table,
    Id,
    AssessmentId,
    ParticipantId,
    AttemptNumber,
    Status,
    Score,
    Percentage,
    Passed,
    StartedAt,
    SubmittedAt,
    TimeSpent,
}

#[derive(DeriveIden)]
enum Responses {
    #[sea_orm(iden = "responses")]
    Table,
    Id,
    AttemptId,
    QuestionId,
    Answer,
    Score,
    IsCorrect,
    CreatedAt,
}
