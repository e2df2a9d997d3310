use crate::{
    Failure,
    models::{Context, Contract, ContractId, ContractUpdate, CreatedContract, NewContract, Status},
};

/// Repository interface for contracts.
///
/// Every mutation is reserved for admins.
pub trait ContractRepository: super::Repository {
    /// Retrieve a contract by id, regardless of owner.
    fn get_contract(
        &self,
        contract_id: ContractId,
        context: &Context,
    ) -> impl Future<Output = Result<Result<Contract, Failure>, Self::Error>> + Send;

    /// Every contract in the store.
    fn get_all_contracts(
        &self,
        context: &Context,
    ) -> impl Future<Output = Result<Vec<Contract>, Self::Error>> + Send;

    /// The contracts made for the caller's project.
    fn get_contracts_by_project_id(
        &self,
        context: &Context,
    ) -> impl Future<Output = Result<Vec<Contract>, Self::Error>> + Send;

    /// The contracts with the given status; non-admins only see their own.
    fn get_contracts_by_status(
        &self,
        status: Status,
        context: &Context,
    ) -> impl Future<Output = Result<Vec<Contract>, Self::Error>> + Send;

    /// Every contract that has not expired.
    fn get_unexpired_contracts(
        &self,
        context: &Context,
    ) -> impl Future<Output = Result<Vec<Contract>, Self::Error>> + Send;

    /// Create a contract and link it to `contract.offers`.
    ///
    /// The contract row and its relationship rows are written atomically:
    /// if any link cannot be inserted (e.g. an unknown offer id), nothing is
    /// persisted and the store error is returned.
    ///
    /// # Returns
    ///
    /// - Ok(Ok(created)) on success
    /// - Ok(Err(Failure::RequiresAdmin)) if the caller is not an admin
    /// - Err otherwise
    fn create_contract(
        &self,
        contract: NewContract,
        context: &Context,
    ) -> impl Future<Output = Result<Result<CreatedContract, Failure>, Self::Error>> + Send;

    /// Apply `update` to a contract. Admin only.
    fn update_contract(
        &self,
        contract_id: ContractId,
        update: ContractUpdate,
        context: &Context,
    ) -> impl Future<Output = Result<Result<Contract, Failure>, Self::Error>> + Send;

    /// Permanently remove a contract and its relationships. Admin only.
    fn destroy_contract(
        &self,
        contract_id: ContractId,
        context: &Context,
    ) -> impl Future<Output = Result<Result<(), Failure>, Self::Error>> + Send;
}
