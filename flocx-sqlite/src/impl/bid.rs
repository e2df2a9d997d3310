use crate::{
    Db,
    types::{BidRow, collect},
};
use flocx_core::{
    Failure,
    models::{Bid, BidId, BidUpdate, Context, NewBid, ProjectId, Status},
    ports::BidRepository,
};
use sqlx::types::Json;
use time::OffsetDateTime;

async fn fetch_bid<'c, E>(executor: E, bid_id: BidId) -> Result<Option<Bid>, sqlx::Error>
where
    E: sqlx::Executor<'c, Database = sqlx::Sqlite>,
{
    sqlx::query_as::<_, BidRow>("select * from bid where bid_id = $1")
        .bind(bid_id.to_string())
        .fetch_optional(executor)
        .await?
        .map(Bid::try_from)
        .transpose()
}

impl BidRepository for Db {
    async fn get_bid(
        &self,
        bid_id: BidId,
        _context: &Context,
    ) -> Result<Result<Bid, Failure>, Self::Error> {
        Ok(fetch_bid(&self.reader, bid_id)
            .await?
            .ok_or_else(|| Failure::not_found(Bid::KIND, bid_id)))
    }

    async fn get_all_bids(&self, _context: &Context) -> Result<Vec<Bid>, Self::Error> {
        let rows = sqlx::query_as::<_, BidRow>("select * from bid order by rowid")
            .fetch_all(&self.reader)
            .await?;
        collect(rows)
    }

    async fn get_bids_by_project_id(&self, context: &Context) -> Result<Vec<Bid>, Self::Error> {
        let rows =
            sqlx::query_as::<_, BidRow>("select * from bid where project_id = $1 order by rowid")
                .bind(context.project_id.as_str())
                .fetch_all(&self.reader)
                .await?;
        collect(rows)
    }

    async fn get_bids_by_status(
        &self,
        status: Status,
        context: &Context,
    ) -> Result<Vec<Bid>, Self::Error> {
        let rows = sqlx::query_as::<_, BidRow>(
            r#"
            select * from bid
            where status = $1
            and ($2 is null or project_id = $2)
            order by rowid
            "#,
        )
        .bind(status.as_str())
        .bind(context.scope().map(ProjectId::as_str))
        .fetch_all(&self.reader)
        .await?;
        collect(rows)
    }

    async fn get_unexpired_bids(&self, _context: &Context) -> Result<Vec<Bid>, Self::Error> {
        let rows =
            sqlx::query_as::<_, BidRow>("select * from bid where status != $1 order by rowid")
                .bind(Status::Expired.as_str())
                .fetch_all(&self.reader)
                .await?;
        collect(rows)
    }

    async fn create_bid(&self, bid: NewBid, context: &Context) -> Result<Bid, Self::Error> {
        let bid_id = BidId::generate();
        let now = OffsetDateTime::now_utc();
        let row = sqlx::query_as::<_, BidRow>(
            r#"
            insert into bid (
                bid_id, project_id, quantity, start_time, end_time, duration,
                status, server_config_query, cost, created_at, updated_at
            )
            values
                ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            returning *
            "#,
        )
        .bind(bid_id.to_string())
        .bind(context.project_id.as_str())
        .bind(bid.quantity)
        .bind(bid.start_time)
        .bind(bid.end_time)
        .bind(bid.duration)
        .bind(bid.status.as_str())
        .bind(Json(&bid.server_config_query))
        .bind(bid.cost)
        .bind(now)
        .fetch_one(&self.writer)
        .await?;

        tracing::debug!(%bid_id, project_id = %context.project_id, "created bid");
        row.try_into()
    }

    async fn update_bid(
        &self,
        bid_id: BidId,
        update: BidUpdate,
        context: &Context,
    ) -> Result<Result<Bid, Failure>, Self::Error> {
        let mut tx = self.writer.begin().await?;

        let Some(bid) = fetch_bid(&mut *tx, bid_id).await? else {
            return Ok(Err(Failure::not_found(Bid::KIND, bid_id)));
        };
        if let Err(failure) = context.check_owner(Bid::KIND, bid_id, &bid.project_id) {
            tracing::warn!(%bid_id, project_id = %context.project_id, "refused bid update");
            return Ok(Err(failure));
        }

        let row = sqlx::query_as::<_, BidRow>(
            r#"
            update bid
            set
                quantity = coalesce($2, quantity),
                start_time = coalesce($3, start_time),
                end_time = coalesce($4, end_time),
                duration = coalesce($5, duration),
                status = coalesce($6, status),
                server_config_query = coalesce($7, server_config_query),
                cost = coalesce($8, cost),
                updated_at = $9
            where
                bid_id = $1
            returning *
            "#,
        )
        .bind(bid_id.to_string())
        .bind(update.quantity)
        .bind(update.start_time)
        .bind(update.end_time)
        .bind(update.duration)
        .bind(update.status.map(|status| status.as_str()))
        .bind(update.server_config_query.as_ref().map(Json))
        .bind(update.cost)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::debug!(%bid_id, "updated bid");
        Ok(Ok(row.try_into()?))
    }

    async fn destroy_bid(
        &self,
        bid_id: BidId,
        context: &Context,
    ) -> Result<Result<(), Failure>, Self::Error> {
        let mut tx = self.writer.begin().await?;

        let Some(bid) = fetch_bid(&mut *tx, bid_id).await? else {
            return Ok(Err(Failure::not_found(Bid::KIND, bid_id)));
        };
        if let Err(failure) = context.check_owner(Bid::KIND, bid_id, &bid.project_id) {
            tracing::warn!(%bid_id, project_id = %context.project_id, "refused bid deletion");
            return Ok(Err(failure));
        }

        sqlx::query(
            r#"
            delete from bid
            where bid_id = $1
            and ($2 is null or project_id = $2)
            "#,
        )
        .bind(bid_id.to_string())
        .bind(context.scope().map(ProjectId::as_str))
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::debug!(%bid_id, "deleted bid");
        Ok(Ok(()))
    }
}
