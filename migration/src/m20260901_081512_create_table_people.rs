use crate::extension::postgres::Type;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(UserRole::Table)
                    .values([UserRole::Master, UserRole::Leader, UserRole::Employee])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(AccessLevel::Table)
                    .values([AccessLevel::Premium, AccessLevel::Pleno])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(CompetencyCategory::Table)
                    .values([
                        CompetencyCategory::CulturalCore,
                        CompetencyCategory::SoftSkillAttitude,
                        CompetencyCategory::SoftSkillRelational,
                        CompetencyCategory::SoftSkillDistinctive,
                        CompetencyCategory::HardSkillTechnical,
                        CompetencyCategory::ResultsSkill,
                        CompetencyCategory::Leadership,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::UserId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(Users::Email).string_len(320).not_null().unique_key())
                    .col(ColumnDef::new(Users::Name).string().null())
                    .col(ColumnDef::new(Users::Password).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Users::Role)
                            .enumeration(
                                UserRole::Table,
                                [UserRole::Master, UserRole::Leader, UserRole::Employee],
                            )
                            .not_null()
                            .default("employee"),
                    )
                    .col(ColumnDef::new(Users::LastSignedIn).timestamp().null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
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
                    .table(Position::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Position::PositionId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(Position::Title).string_len(150).not_null())
                    .col(ColumnDef::new(Position::Description).text().null())
                    .col(ColumnDef::new(Position::Requirements).text().null())
                    .col(
                        ColumnDef::new(Position::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Position::UpdatedAt)
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
                    .table(Competency::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Competency::CompetencyId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(Competency::Name).string_len(150).not_null())
                    .col(ColumnDef::new(Competency::Description).text().null())
                    .col(
                        ColumnDef::new(Competency::Category)
                            .enumeration(
                                CompetencyCategory::Table,
                                [
                                    CompetencyCategory::CulturalCore,
                                    CompetencyCategory::SoftSkillAttitude,
                                    CompetencyCategory::SoftSkillRelational,
                                    CompetencyCategory::SoftSkillDistinctive,
                                    CompetencyCategory::HardSkillTechnical,
                                    CompetencyCategory::ResultsSkill,
                                    CompetencyCategory::Leadership,
                                ],
                            )
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Competency::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Competency::UpdatedAt)
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
                    .table(PositionCompetency::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PositionCompetency::PositionCompetencyId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(PositionCompetency::PositionId).uuid().not_null())
                    .col(ColumnDef::new(PositionCompetency::CompetencyId).uuid().not_null())
                    .col(
                        ColumnDef::new(PositionCompetency::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_position_competency_position")
                            .from_tbl(PositionCompetency::Table)
                            .from_col(PositionCompetency::PositionId)
                            .to_tbl(Position::Table)
                            .to_col(Position::PositionId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_position_competency_competency")
                            .from_tbl(PositionCompetency::Table)
                            .from_col(PositionCompetency::CompetencyId)
                            .to_tbl(Competency::Table)
                            .to_col(Competency::CompetencyId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_position_competency_unique")
                    .table(PositionCompetency::Table)
                    .col(PositionCompetency::PositionId)
                    .col(PositionCompetency::CompetencyId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employee::EmployeeId)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .extra("DEFAULT gen_random_uuid()".to_string()),
                    )
                    .col(ColumnDef::new(Employee::UserId).uuid().null())
                    .col(ColumnDef::new(Employee::Name).string().not_null())
                    .col(ColumnDef::new(Employee::Badge).string_len(50).not_null().unique_key())
                    .col(ColumnDef::new(Employee::Sector).string_len(100).not_null())
                    .col(ColumnDef::new(Employee::Email).string_len(320).not_null())
                    .col(ColumnDef::new(Employee::Cpf).string_len(14).not_null().unique_key())
                    .col(ColumnDef::new(Employee::PositionId).uuid().not_null())
                    .col(ColumnDef::new(Employee::BirthDate).date().null())
                    .col(ColumnDef::new(Employee::AdmissionDate).date().not_null())
                    .col(ColumnDef::new(Employee::LeaderId).uuid().null())
                    .col(
                        ColumnDef::new(Employee::AccessLevel)
                            .enumeration(
                                AccessLevel::Table,
                                [AccessLevel::Premium, AccessLevel::Pleno],
                            )
                            .not_null()
                            .default("pleno"),
                    )
                    .col(ColumnDef::new(Employee::LastAccessAt).timestamp().null())
                    .col(
                        ColumnDef::new(Employee::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Employee::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_user")
                            .from_tbl(Employee::Table)
                            .from_col(Employee::UserId)
                            .to_tbl(Users::Table)
                            .to_col(Users::UserId)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_position")
                            .from_tbl(Employee::Table)
                            .from_col(Employee::PositionId)
                            .to_tbl(Position::Table)
                            .to_col(Position::PositionId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_leader")
                            .from_tbl(Employee::Table)
                            .from_col(Employee::LeaderId)
                            .to_tbl(Employee::Table)
                            .to_col(Employee::EmployeeId)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employee_leader_id")
                    .table(Employee::Table)
                    .col(Employee::LeaderId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employee::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PositionCompetency::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Competency::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Position::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(CompetencyCategory::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(AccessLevel::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(UserRole::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    UserId,
    Email,
    Name,
    Password,
    Role,
    LastSignedIn,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum UserRole {
    Table,
    Master,
    Leader,
    Employee,
}

#[derive(DeriveIden)]
enum AccessLevel {
    Table,
    Premium,
    Pleno,
}

#[derive(DeriveIden)]
enum CompetencyCategory {
    Table,
    #[sea_orm(iden = "Cultural/Core")]
    CulturalCore,
    #[sea_orm(iden = "Soft Skill (Atitude)")]
    SoftSkillAttitude,
    #[sea_orm(iden = "Soft Skill (Relacional)")]
    SoftSkillRelational,
    #[sea_orm(iden = "Soft Skill (Distintiva)")]
    SoftSkillDistinctive,
    #[sea_orm(iden = "Hard Skill (Técnica)")]
    HardSkillTechnical,
    #[sea_orm(iden = "Results Skill")]
    ResultsSkill,
    #[sea_orm(iden = "Liderança")]
    Leadership,
}

#[derive(DeriveIden)]
pub(crate) enum Position {
    Table,
    PositionId,
    Title,
    Description,
    Requirements,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Competency {
    Table,
    CompetencyId,
    Name,
    Description,
    Category,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PositionCompetency {
    Table,
    PositionCompetencyId,
    PositionId,
    CompetencyId,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Employee {
    Table,
    EmployeeId,
    UserId,
    Name,
    Badge,
    Sector,
    Email,
    Cpf,
    PositionId,
    BirthDate,
    AdmissionDate,
    LeaderId,
    AccessLevel,
    LastAccessAt,
    CreatedAt,
    UpdatedAt,
}
