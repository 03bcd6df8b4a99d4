pub use sea_orm_migration::prelude::*;

mod m20260901_081512_create_table_people;
mod m20260903_140233_create_table_evaluation;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260901_081512_create_table_people::Migration),
            Box::new(m20260903_140233_create_table_evaluation::Migration),
        ]
    }
}
