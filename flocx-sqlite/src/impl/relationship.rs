use crate::{
    Db,
    types::{RelationshipRow, collect},
};
use flocx_core::{
    Failure,
    models::{
        Context, NewOfferContractRelationship, OfferContractRelationship,
        OfferContractRelationshipId, RelationshipFilter, RelationshipUpdate, Status,
    },
    ports::OfferContractRelationshipRepository,
};
use sqlx::SqliteConnection;
use time::OffsetDateTime;

const KIND: &str = OfferContractRelationship::KIND;

async fn fetch_relationship<'c, E>(
    executor: E,
    relationship_id: OfferContractRelationshipId,
) -> Result<Option<OfferContractRelationship>, sqlx::Error>
where
    E: sqlx::Executor<'c, Database = sqlx::Sqlite>,
{
    sqlx::query_as::<_, RelationshipRow>(
        "select * from offer_contract_relationship where offer_contract_relationship_id = $1",
    )
    .bind(relationship_id.to_string())
    .fetch_optional(executor)
    .await?
    .map(OfferContractRelationship::try_from)
    .transpose()
}

/// Insert a relationship on an open connection, typically inside the
/// transaction of a larger write.
pub(crate) async fn insert_relationship(
    conn: &mut SqliteConnection,
    relationship: &NewOfferContractRelationship,
    now: OffsetDateTime,
) -> Result<OfferContractRelationship, sqlx::Error> {
    let relationship_id = OfferContractRelationshipId::generate();
    sqlx::query_as::<_, RelationshipRow>(
        r#"
        insert into offer_contract_relationship (
            offer_contract_relationship_id, offer_id, contract_id, status, created_at, updated_at
        )
        values
            ($1, $2, $3, $4, $5, $5)
        returning *
        "#,
    )
    .bind(relationship_id.to_string())
    .bind(relationship.offer_id.to_string())
    .bind(relationship.contract_id.to_string())
    .bind(relationship.status.as_str())
    .bind(now)
    .fetch_one(conn)
    .await?
    .try_into()
}

impl OfferContractRelationshipRepository for Db {
    async fn get_offer_contract_relationship(
        &self,
        relationship_id: Option<OfferContractRelationshipId>,
        _context: &Context,
    ) -> Result<Result<Option<OfferContractRelationship>, Failure>, Self::Error> {
        let Some(relationship_id) = relationship_id else {
            return Ok(Ok(None));
        };
        match fetch_relationship(&self.reader, relationship_id).await? {
            Some(relationship) => Ok(Ok(Some(relationship))),
            None => Ok(Err(Failure::not_found(KIND, relationship_id))),
        }
    }

    async fn get_all_offer_contract_relationships(
        &self,
        filter: RelationshipFilter,
        _context: &Context,
    ) -> Result<Vec<OfferContractRelationship>, Self::Error> {
        let rows = sqlx::query_as::<_, RelationshipRow>(
            r#"
            select * from offer_contract_relationship
            where ($1 is null or offer_id = $1)
            and ($2 is null or contract_id = $2)
            and ($3 is null or status = $3)
            order by rowid
            "#,
        )
        .bind(filter.offer_id.map(|id| id.to_string()))
        .bind(filter.contract_id.map(|id| id.to_string()))
        .bind(filter.status.map(|status| status.as_str()))
        .fetch_all(&self.reader)
        .await?;
        collect(rows)
    }

    async fn get_unexpired_offer_contract_relationships(
        &self,
        _context: &Context,
    ) -> Result<Vec<OfferContractRelationship>, Self::Error> {
        let rows = sqlx::query_as::<_, RelationshipRow>(
            "select * from offer_contract_relationship where status != $1 order by rowid",
        )
        .bind(Status::Expired.as_str())
        .fetch_all(&self.reader)
        .await?;
        collect(rows)
    }

    async fn create_offer_contract_relationship(
        &self,
        relationship: NewOfferContractRelationship,
        context: &Context,
    ) -> Result<Result<OfferContractRelationship, Failure>, Self::Error> {
        if let Err(failure) = context.check_admin(KIND) {
            tracing::warn!(project_id = %context.project_id, "refused non-admin relationship creation");
            return Ok(Err(failure));
        }

        let mut conn = self.writer.acquire().await?;
        let created =
            insert_relationship(&mut conn, &relationship, OffsetDateTime::now_utc()).await?;

        tracing::debug!(
            relationship_id = %created.offer_contract_relationship_id,
            offer_id = %created.offer_id,
            contract_id = %created.contract_id,
            "created offer/contract relationship"
        );
        Ok(Ok(created))
    }

    async fn update_offer_contract_relationship(
        &self,
        relationship_id: OfferContractRelationshipId,
        update: RelationshipUpdate,
        context: &Context,
    ) -> Result<Result<OfferContractRelationship, Failure>, Self::Error> {
        if let Err(failure) = context.check_admin(KIND) {
            tracing::warn!(%relationship_id, project_id = %context.project_id, "refused relationship update");
            return Ok(Err(failure));
        }

        let row = sqlx::query_as::<_, RelationshipRow>(
            r#"
            update offer_contract_relationship
            set
                status = coalesce($2, status),
                updated_at = $3
            where
                offer_contract_relationship_id = $1
            returning *
            "#,
        )
        .bind(relationship_id.to_string())
        .bind(update.status.map(|status| status.as_str()))
        .bind(OffsetDateTime::now_utc())
        .fetch_optional(&self.writer)
        .await?;

        match row {
            Some(row) => {
                tracing::debug!(%relationship_id, "updated offer/contract relationship");
                Ok(Ok(row.try_into()?))
            }
            None => Ok(Err(Failure::not_found(KIND, relationship_id))),
        }
    }

    async fn destroy_offer_contract_relationship(
        &self,
        relationship_id: OfferContractRelationshipId,
        context: &Context,
    ) -> Result<Result<(), Failure>, Self::Error> {
        if let Err(failure) = context.check_admin(KIND) {
            tracing::warn!(%relationship_id, project_id = %context.project_id, "refused relationship deletion");
            return Ok(Err(failure));
        }

        let deleted = sqlx::query(
            "delete from offer_contract_relationship where offer_contract_relationship_id = $1",
        )
        .bind(relationship_id.to_string())
        .execute(&self.writer)
        .await?;

        if deleted.rows_affected() == 0 {
            Ok(Err(Failure::not_found(KIND, relationship_id)))
        } else {
            tracing::debug!(%relationship_id, "deleted offer/contract relationship");
            Ok(Ok(()))
        }
    }
}
