//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_command;
mod company_command;
mod company_query;
mod company_repository;
mod credential_repository;
mod department_repository;
mod membership_command;
mod password_hasher;
mod token_issuer;
mod unit_of_work;
mod user_directory_query;
mod user_repository;

#[cfg(test)]
pub use auth_command::MockAuthCommand;
pub use auth_command::AuthCommand;
#[cfg(test)]
pub use company_command::MockCompanyCommand;
pub use company_command::CompanyCommand;
#[cfg(test)]
pub use company_query::MockCompanyQuery;
pub use company_query::CompanyQuery;
#[cfg(test)]
pub use company_repository::MockCompanyRepository;
pub use company_repository::{CompanyRepository, CompanyRepositoryError};
#[cfg(test)]
pub use credential_repository::MockCredentialRepository;
pub use credential_repository::{CredentialRepository, CredentialRepositoryError};
#[cfg(test)]
pub use department_repository::MockDepartmentRepository;
pub use department_repository::{DepartmentRepository, DepartmentRepositoryError};
#[cfg(test)]
pub use membership_command::MockMembershipCommand;
pub use membership_command::MembershipCommand;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::PasswordHasher;
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
pub use token_issuer::{TokenIssuer, TokenIssuerError, VerifiedToken};
#[cfg(test)]
pub use unit_of_work::MockTransactionManager;
pub use unit_of_work::{TransactionManager, UnitOfWork, UnitOfWorkError};
#[cfg(test)]
pub use user_directory_query::MockUserDirectoryQuery;
pub use user_directory_query::{DirectoryPage, UserDirectoryQuery};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};

#[cfg(test)]
pub(crate) mod test_doubles;
