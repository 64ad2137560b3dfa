//! Initial schema migration.
//!
//! - `transactions`: raw ledger rows, one per user operation
//! - `currency_rates`: FX multiplier to the primary currency per code

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Transactions {
    Table,
    Id,
    UserId,
    TransactionType,
    Amount,
    CurrencyCode,
    SourceTransactionId,
    Metadata,
    CreatedAt,
}

#[derive(Iden)]
enum CurrencyRates {
    Table,
    CurrencyCode,
    Rate,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Transactions::TransactionType)
                            .string()
                            .not_null(),
                    )
                    // Decimal kept as text to avoid lossy REAL storage.
                    .col(ColumnDef::new(Transactions::Amount).string().not_null())
                    .col(
                        ColumnDef::new(Transactions::CurrencyCode)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::SourceTransactionId).big_integer())
                    .col(ColumnDef::new(Transactions::Metadata).text())
                    .col(ColumnDef::new(Transactions::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-user_id-created_at")
                    .table(Transactions::Table)
                    .col(Transactions::UserId)
                    .col(Transactions::CreatedAt)
                    .col(Transactions::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CurrencyRates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CurrencyRates::CurrencyCode)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CurrencyRates::Rate).string().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CurrencyRates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        Ok(())
    }
}
