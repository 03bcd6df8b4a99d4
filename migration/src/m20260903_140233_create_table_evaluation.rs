use crate::extension::postgres::Type;
use crate::m20260901_081512_create_table_people::{Competency, Employee};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(CycleStatus::Table)
                    .values([
                        CycleStatus::Planning,
                        CycleStatus::InProgress,
                        CycleStatus::Completed,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(EvaluationStatus::Table)
                    .values([
                        EvaluationStatus::Draft,
                        EvaluationStatus::Submitted,
                        EvaluationStatus::Completed,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EvaluationCycle::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EvaluationCycle::CycleId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(EvaluationCycle::Name).string_len(150).not_null())
                    .col(ColumnDef::new(EvaluationCycle::StartDate).date().not_null())
                    .col(ColumnDef::new(EvaluationCycle::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(EvaluationCycle::Status)
                            .enumeration(
                                CycleStatus::Table,
                                [
                                    CycleStatus::Planning,
                                    CycleStatus::InProgress,
                                    CycleStatus::Completed,
                                ],
                            )
                            .not_null()
                            .default("planning"),
                    )
                    .col(
                        ColumnDef::new(EvaluationCycle::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(EvaluationCycle::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Evaluation::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Evaluation::EvaluationId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(Evaluation::CycleId).uuid().not_null())
                    .col(ColumnDef::new(Evaluation::EvaluatedEmployeeId).uuid().not_null())
                    .col(ColumnDef::new(Evaluation::EvaluatorId).uuid().not_null())
                    .col(
                        ColumnDef::new(Evaluation::Status)
                            .enumeration(
                                EvaluationStatus::Table,
                                [
                                    EvaluationStatus::Draft,
                                    EvaluationStatus::Submitted,
                                    EvaluationStatus::Completed,
                                ],
                            )
                            .not_null()
                            .default("draft"),
                    )
                    .col(ColumnDef::new(Evaluation::TotalScore).decimal_len(5, 2).null())
                    .col(
                        ColumnDef::new(Evaluation::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Evaluation::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_evaluation_cycle")
                            .from_tbl(Evaluation::Table)
                            .from_col(Evaluation::CycleId)
                            .to_tbl(EvaluationCycle::Table)
                            .to_col(EvaluationCycle::CycleId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_evaluation_evaluated_employee")
                            .from_tbl(Evaluation::Table)
                            .from_col(Evaluation::EvaluatedEmployeeId)
                            .to_tbl(Employee::Table)
                            .to_col(Employee::EmployeeId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_evaluation_evaluator")
                            .from_tbl(Evaluation::Table)
                            .from_col(Evaluation::EvaluatorId)
                            .to_tbl(Employee::Table)
                            .to_col(Employee::EmployeeId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EvaluationScore::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EvaluationScore::EvaluationScoreId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(EvaluationScore::EvaluationId).uuid().not_null())
                    .col(ColumnDef::new(EvaluationScore::CompetencyId).uuid().not_null())
                    .col(ColumnDef::new(EvaluationScore::Weight).integer().not_null())
                    .col(ColumnDef::new(EvaluationScore::Score).integer().not_null())
                    .col(
                        ColumnDef::new(EvaluationScore::WeightedScore)
                            .decimal_len(5, 2)
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(EvaluationScore::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(EvaluationScore::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_evaluation_score_evaluation")
                            .from_tbl(EvaluationScore::Table)
                            .from_col(EvaluationScore::EvaluationId)
                            .to_tbl(Evaluation::Table)
                            .to_col(Evaluation::EvaluationId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_evaluation_score_competency")
                            .from_tbl(EvaluationScore::Table)
                            .from_col(EvaluationScore::CompetencyId)
                            .to_tbl(Competency::Table)
                            .to_col(Competency::CompetencyId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_evaluation_score_evaluation_id")
                    .table(EvaluationScore::Table)
                    .col(EvaluationScore::EvaluationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Pdi::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pdi::PdiId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(Pdi::EvaluationId).uuid().not_null().unique_key())
                    .col(ColumnDef::new(Pdi::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(Pdi::Strengths).text().null())
                    .col(ColumnDef::new(Pdi::ImprovementAreas).text().null())
                    .col(ColumnDef::new(Pdi::DevelopmentPlan).text().null())
                    .col(ColumnDef::new(Pdi::Feedback).text().null())
                    .col(
                        ColumnDef::new(Pdi::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Pdi::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pdi_evaluation")
                            .from_tbl(Pdi::Table)
                            .from_col(Pdi::EvaluationId)
                            .to_tbl(Evaluation::Table)
                            .to_col(Evaluation::EvaluationId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pdi_employee")
                            .from_tbl(Pdi::Table)
                            .from_col(Pdi::EmployeeId)
                            .to_tbl(Employee::Table)
                            .to_col(Employee::EmployeeId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(NineBox::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NineBox::NineBoxId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(NineBox::EvaluationId).uuid().not_null().unique_key())
                    .col(ColumnDef::new(NineBox::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(NineBox::Performance).integer().not_null())
                    .col(ColumnDef::new(NineBox::Potential).integer().not_null())
                    .col(ColumnDef::new(NineBox::Classification).string_len(50).not_null())
                    .col(
                        ColumnDef::new(NineBox::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(NineBox::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_nine_box_evaluation")
                            .from_tbl(NineBox::Table)
                            .from_col(NineBox::EvaluationId)
                            .to_tbl(Evaluation::Table)
                            .to_col(Evaluation::EvaluationId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_nine_box_employee")
                            .from_tbl(NineBox::Table)
                            .from_col(NineBox::EmployeeId)
                            .to_tbl(Employee::Table)
                            .to_col(Employee::EmployeeId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NineBox::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pdi::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_evaluation_score_evaluation_id")
                    .table(EvaluationScore::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(EvaluationScore::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Evaluation::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EvaluationCycle::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(EvaluationStatus::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(CycleStatus::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum CycleStatus {
    Table,
    Planning,
    InProgress,
    Completed,
}

#[derive(DeriveIden)]
enum EvaluationStatus {
    Table,
    Draft,
    Submitted,
    Completed,
}

#[derive(DeriveIden)]
enum EvaluationCycle {
    Table,
    CycleId,
    Name,
    StartDate,
    EndDate,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Evaluation {
    Table,
    EvaluationId,
    CycleId,
    EvaluatedEmployeeId,
    EvaluatorId,
    Status,
    TotalScore,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EvaluationScore {
    Table,
    EvaluationScoreId,
    EvaluationId,
    CompetencyId,
    Weight,
    Score,
    WeightedScore,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Pdi {
    Table,
    PdiId,
    EvaluationId,
    EmployeeId,
    Strengths,
    ImprovementAreas,
    DevelopmentPlan,
    Feedback,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum NineBox {
    Table,
    NineBoxId,
    EvaluationId,
    EmployeeId,
    Performance,
    Potential,
    Classification,
    CreatedAt,
    UpdatedAt,
}
