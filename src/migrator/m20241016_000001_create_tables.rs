use sea_orm::{EntityTrait, Schema};
use sea_orm_migration::prelude::*;

use crate::entity::{AuditLogs, Carts, OrderItems, Orders, Products, Reports, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

async fn create_from_entity<E>(manager: &SchemaManager<'_>, schema: &Schema, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    manager
        .create_table(schema.create_table_from_entity(entity).if_not_exists().to_owned())
        .await?;
    for mut index in schema.create_index_from_entity(entity) {
        manager.create_index(index.if_not_exists().to_owned()).await?;
    }
    Ok(())
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(manager.get_database_backend());

        // Parents before children so foreign keys resolve.
        create_from_entity(manager, &schema, Users).await?;
        create_from_entity(manager, &schema, Products).await?;
        create_from_entity(manager, &schema, Carts).await?;
        create_from_entity(manager, &schema, Orders).await?;
        create_from_entity(manager, &schema, OrderItems).await?;
        create_from_entity(manager, &schema, Reports).await?;
        create_from_entity(manager, &schema, AuditLogs).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(AuditLogs).if_exists().to_owned()).await?;
        manager.drop_table(Table::drop().table(Reports).if_exists().to_owned()).await?;
        manager.drop_table(Table::drop().table(OrderItems).if_exists().to_owned()).await?;
        manager.drop_table(Table::drop().table(Orders).if_exists().to_owned()).await?;
        manager.drop_table(Table::drop().table(Carts).if_exists().to_owned()).await?;
        manager.drop_table(Table::drop().table(Products).if_exists().to_owned()).await?;
        manager.drop_table(Table::drop().table(Users).if_exists().to_owned()).await?;
        Ok(())
    }
}
