use super::relationship::insert_relationship;
use crate::{
    Db,
    types::{ContractRow, collect},
};
use flocx_core::{
    Failure,
    models::{
        Context, Contract, ContractId, ContractUpdate, CreatedContract, NewContract,
        NewOfferContractRelationship, ProjectId, Status,
    },
    ports::ContractRepository,
};
use time::OffsetDateTime;

async fn fetch_contract<'c, E>(
    executor: E,
    contract_id: ContractId,
) -> Result<Option<Contract>, sqlx::Error>
where
    E: sqlx::Executor<'c, Database = sqlx::Sqlite>,
{
    sqlx::query_as::<_, ContractRow>("select * from contract where contract_id = $1")
        .bind(contract_id.to_string())
        .fetch_optional(executor)
        .await?
        .map(Contract::try_from)
        .transpose()
}

impl ContractRepository for Db {
    async fn get_contract(
        &self,
        contract_id: ContractId,
        _context: &Context,
    ) -> Result<Result<Contract, Failure>, Self::Error> {
        Ok(fetch_contract(&self.reader, contract_id)
            .await?
            .ok_or_else(|| Failure::not_found(Contract::KIND, contract_id)))
    }

    async fn get_all_contracts(&self, _context: &Context) -> Result<Vec<Contract>, Self::Error> {
        let rows = sqlx::query_as::<_, ContractRow>("select * from contract order by rowid")
            .fetch_all(&self.reader)
            .await?;
        collect(rows)
    }

    async fn get_contracts_by_project_id(
        &self,
        context: &Context,
    ) -> Result<Vec<Contract>, Self::Error> {
        let rows = sqlx::query_as::<_, ContractRow>(
            "select * from contract where project_id = $1 order by rowid",
        )
        .bind(context.project_id.as_str())
        .fetch_all(&self.reader)
        .await?;
        collect(rows)
    }

    async fn get_contracts_by_status(
        &self,
        status: Status,
        context: &Context,
    ) -> Result<Vec<Contract>, Self::Error> {
        let rows = sqlx::query_as::<_, ContractRow>(
            r#"
            select * from contract
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

    async fn get_unexpired_contracts(
        &self,
        _context: &Context,
    ) -> Result<Vec<Contract>, Self::Error> {
        let rows = sqlx::query_as::<_, ContractRow>(
            "select * from contract where status != $1 order by rowid",
        )
        .bind(Status::Expired.as_str())
        .fetch_all(&self.reader)
        .await?;
        collect(rows)
    }

    async fn create_contract(
        &self,
        contract: NewContract,
        context: &Context,
    ) -> Result<Result<CreatedContract, Failure>, Self::Error> {
        if let Err(failure) = context.check_admin(Contract::KIND) {
            tracing::warn!(project_id = %context.project_id, "refused non-admin contract creation");
            return Ok(Err(failure));
        }

        let NewContract {
            project_id,
            status,
            start_time,
            end_time,
            cost,
            bid_id,
            offers,
        } = contract;
        let project_id = project_id.unwrap_or_else(|| context.project_id.clone());
        let contract_id = ContractId::generate();
        let now = OffsetDateTime::now_utc();

        // The contract and its links commit together or not at all: any error
        // below drops the transaction, which rolls it back.
        let mut tx = self.writer.begin().await?;

        let contract: Contract = sqlx::query_as::<_, ContractRow>(
            r#"
            insert into contract (
                contract_id, project_id, status, start_time, end_time, cost, bid_id,
                created_at, updated_at
            )
            values
                ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            returning *
            "#,
        )
        .bind(contract_id.to_string())
        .bind(project_id.as_str())
        .bind(status.as_str())
        .bind(start_time)
        .bind(end_time)
        .bind(cost)
        .bind(bid_id.map(|id| id.to_string()))
        .bind(now)
        .fetch_one(&mut *tx)
        .await?
        .try_into()?;

        let mut relationships = Vec::with_capacity(offers.len());
        for offer_id in offers {
            let link = NewOfferContractRelationship {
                offer_id,
                contract_id,
                status: Status::Available,
            };
            relationships.push(insert_relationship(&mut tx, &link, now).await?);
        }

        tx.commit().await?;

        tracing::debug!(
            %contract_id,
            project_id = %contract.project_id,
            offers = relationships.len(),
            "created contract"
        );
        Ok(Ok(CreatedContract {
            contract,
            relationships,
        }))
    }

    async fn update_contract(
        &self,
        contract_id: ContractId,
        update: ContractUpdate,
        context: &Context,
    ) -> Result<Result<Contract, Failure>, Self::Error> {
        if !context.is_admin {
            tracing::warn!(%contract_id, project_id = %context.project_id, "refused contract update");
            return Ok(Err(Failure::no_permission(Contract::KIND, contract_id)));
        }

        let row = sqlx::query_as::<_, ContractRow>(
            r#"
            update contract
            set
                status = coalesce($2, status),
                start_time = coalesce($3, start_time),
                end_time = coalesce($4, end_time),
                cost = coalesce($5, cost),
                updated_at = $6
            where
                contract_id = $1
            returning *
            "#,
        )
        .bind(contract_id.to_string())
        .bind(update.status.map(|status| status.as_str()))
        .bind(update.start_time)
        .bind(update.end_time)
        .bind(update.cost)
        .bind(OffsetDateTime::now_utc())
        .fetch_optional(&self.writer)
        .await?;

        match row {
            Some(row) => {
                tracing::debug!(%contract_id, "updated contract");
                Ok(Ok(row.try_into()?))
            }
            None => Ok(Err(Failure::not_found(Contract::KIND, contract_id))),
        }
    }

    async fn destroy_contract(
        &self,
        contract_id: ContractId,
        context: &Context,
    ) -> Result<Result<(), Failure>, Self::Error> {
        if !context.is_admin {
            tracing::warn!(%contract_id, project_id = %context.project_id, "refused contract deletion");
            return Ok(Err(Failure::no_permission(Contract::KIND, contract_id)));
        }

        let mut tx = self.writer.begin().await?;

        if fetch_contract(&mut *tx, contract_id).await?.is_none() {
            return Ok(Err(Failure::not_found(Contract::KIND, contract_id)));
        }

        // relationships go with it through `on delete cascade`
        sqlx::query("delete from contract where contract_id = $1")
            .bind(contract_id.to_string())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::debug!(%contract_id, "deleted contract");
        Ok(Ok(()))
    }
}
