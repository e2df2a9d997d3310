use super::is_unique_violation;
use crate::{
    Db,
    types::{OfferRow, collect},
};
use flocx_core::{
    Failure,
    models::{Context, NewOffer, Offer, OfferId, OfferUpdate, ProjectId, ResourceType, Status},
    ports::{OfferRepository, ResourceAuthority},
};
use sqlx::types::Json;
use time::OffsetDateTime;

fn duplicate_offer(resource_type: &ResourceType, resource_id: &str) -> Failure {
    Failure::Validation(format!(
        "{resource_type} {resource_id} already has an available offer"
    ))
}

async fn fetch_offer<'c, E>(
    executor: E,
    offer_id: OfferId,
) -> Result<Option<Offer>, sqlx::Error>
where
    E: sqlx::Executor<'c, Database = sqlx::Sqlite>,
{
    sqlx::query_as::<_, OfferRow>("select * from offer where offer_id = $1")
        .bind(offer_id.to_string())
        .fetch_optional(executor)
        .await?
        .map(Offer::try_from)
        .transpose()
}

impl OfferRepository for Db {
    async fn get_offer(
        &self,
        offer_id: OfferId,
        _context: &Context,
    ) -> Result<Result<Offer, Failure>, Self::Error> {
        Ok(fetch_offer(&self.reader, offer_id)
            .await?
            .ok_or_else(|| Failure::not_found(Offer::KIND, offer_id)))
    }

    async fn get_all_offers(&self, _context: &Context) -> Result<Vec<Offer>, Self::Error> {
        let rows = sqlx::query_as::<_, OfferRow>("select * from offer order by rowid")
            .fetch_all(&self.reader)
            .await?;
        collect(rows)
    }

    async fn get_offers_by_project_id(&self, context: &Context) -> Result<Vec<Offer>, Self::Error> {
        let rows = sqlx::query_as::<_, OfferRow>(
            r#"
            select * from offer
            where project_id = $1
            order by rowid
            "#,
        )
        .bind(context.project_id.as_str())
        .fetch_all(&self.reader)
        .await?;
        collect(rows)
    }

    async fn get_offers_by_resource_id(
        &self,
        resource_id: &str,
        status: Option<Status>,
        _context: &Context,
    ) -> Result<Vec<Offer>, Self::Error> {
        let rows = sqlx::query_as::<_, OfferRow>(
            r#"
            select * from offer
            where resource_id = $1
            and ($2 is null or status = $2)
            order by rowid
            "#,
        )
        .bind(resource_id)
        .bind(status.map(|status| status.as_str()))
        .fetch_all(&self.reader)
        .await?;
        collect(rows)
    }

    async fn get_offers_by_status(
        &self,
        status: Status,
        context: &Context,
    ) -> Result<Vec<Offer>, Self::Error> {
        let rows = sqlx::query_as::<_, OfferRow>(
            r#"
            select * from offer
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

    async fn get_unexpired_offers(&self, context: &Context) -> Result<Vec<Offer>, Self::Error> {
        let rows = sqlx::query_as::<_, OfferRow>(
            r#"
            select * from offer
            where status != $1
            and ($2 is null or project_id = $2)
            order by rowid
            "#,
        )
        .bind(Status::Expired.as_str())
        .bind(context.scope().map(ProjectId::as_str))
        .fetch_all(&self.reader)
        .await?;
        collect(rows)
    }

    async fn create_offer<A: ResourceAuthority + Sync>(
        &self,
        authority: &A,
        offer: NewOffer,
        context: &Context,
    ) -> Result<Result<Offer, Failure>, Self::Error> {
        let resource_type = offer.resource_type.unwrap_or_default();

        if !authority
            .is_resource_admin(&resource_type, &offer.resource_id, &context.project_id)
            .await
        {
            tracing::warn!(
                project_id = %context.project_id,
                resource_type = %resource_type,
                resource_id = %offer.resource_id,
                "project does not administer the resource it tried to offer"
            );
            return Ok(Err(Failure::no_permission(
                resource_type.as_str(),
                &offer.resource_id,
            )));
        }

        let mut tx = self.writer.begin().await?;

        // The partial unique index is what actually enforces this; checking
        // first gives the common case a clean failure without a write attempt.
        let available: i64 = sqlx::query_scalar(
            "select count(*) from offer where resource_id = $1 and status = $2",
        )
        .bind(&offer.resource_id)
        .bind(Status::Available.as_str())
        .fetch_one(&mut *tx)
        .await?;
        if available > 0 {
            return Ok(Err(duplicate_offer(&resource_type, &offer.resource_id)));
        }

        let offer_id = OfferId::generate();
        let now = OffsetDateTime::now_utc();
        let inserted = sqlx::query_as::<_, OfferRow>(
            r#"
            insert into offer (
                offer_id, project_id, resource_id, resource_type, status,
                start_time, end_time, server_config, cost, created_at, updated_at
            )
            values
                ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            returning *
            "#,
        )
        .bind(offer_id.to_string())
        .bind(context.project_id.as_str())
        .bind(&offer.resource_id)
        .bind(resource_type.as_str())
        .bind(offer.status.as_str())
        .bind(offer.start_time)
        .bind(offer.end_time)
        .bind(Json(&offer.server_config))
        .bind(offer.cost)
        .bind(now)
        .fetch_one(&mut *tx)
        .await;

        let row = match inserted {
            Ok(row) => row,
            Err(e) if is_unique_violation(&e) => {
                return Ok(Err(duplicate_offer(&resource_type, &offer.resource_id)));
            }
            Err(e) => return Err(e),
        };
        tx.commit().await?;

        tracing::debug!(%offer_id, project_id = %context.project_id, "created offer");
        Ok(Ok(row.try_into()?))
    }

    async fn update_offer(
        &self,
        offer_id: OfferId,
        update: OfferUpdate,
        context: &Context,
    ) -> Result<Result<Offer, Failure>, Self::Error> {
        let mut tx = self.writer.begin().await?;

        let Some(offer) = fetch_offer(&mut *tx, offer_id).await? else {
            return Ok(Err(Failure::not_found(Offer::KIND, offer_id)));
        };
        if let Err(failure) = context.check_owner(Offer::KIND, offer_id, &offer.project_id) {
            tracing::warn!(%offer_id, project_id = %context.project_id, "refused offer update");
            return Ok(Err(failure));
        }

        let updated = sqlx::query_as::<_, OfferRow>(
            r#"
            update offer
            set
                status = coalesce($2, status),
                start_time = coalesce($3, start_time),
                end_time = coalesce($4, end_time),
                server_config = coalesce($5, server_config),
                cost = coalesce($6, cost),
                updated_at = $7
            where
                offer_id = $1
            returning *
            "#,
        )
        .bind(offer_id.to_string())
        .bind(update.status.map(|status| status.as_str()))
        .bind(update.start_time)
        .bind(update.end_time)
        .bind(update.server_config.as_ref().map(Json))
        .bind(update.cost)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(&mut *tx)
        .await;

        let row = match updated {
            Ok(row) => row,
            Err(e) if is_unique_violation(&e) => {
                return Ok(Err(duplicate_offer(
                    &offer.resource_type,
                    &offer.resource_id,
                )));
            }
            Err(e) => return Err(e),
        };
        tx.commit().await?;

        tracing::debug!(%offer_id, "updated offer");
        Ok(Ok(row.try_into()?))
    }

    async fn destroy_offer(
        &self,
        offer_id: OfferId,
        context: &Context,
    ) -> Result<Result<(), Failure>, Self::Error> {
        let mut tx = self.writer.begin().await?;

        let Some(offer) = fetch_offer(&mut *tx, offer_id).await? else {
            return Ok(Err(Failure::not_found(Offer::KIND, offer_id)));
        };
        if let Err(failure) = context.check_owner(Offer::KIND, offer_id, &offer.project_id) {
            tracing::warn!(%offer_id, project_id = %context.project_id, "refused offer deletion");
            return Ok(Err(failure));
        }

        sqlx::query(
            r#"
            delete from offer
            where offer_id = $1
            and ($2 is null or project_id = $2)
            "#,
        )
        .bind(offer_id.to_string())
        .bind(context.scope().map(ProjectId::as_str))
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::debug!(%offer_id, "deleted offer");
        Ok(Ok(()))
    }
}
