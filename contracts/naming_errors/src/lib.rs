#![no_std]

use soroban_sdk::contracterror;

/// @title  ErrorCategory
/// @notice Groups errors by domain for monitoring, alerting, and dashboards.
/// @dev    Off-chain consumers should switch on this value first, then on the
///         specific `ContractError` code for fine-grained handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Contract setup and initialization errors (codes 1-99).
    Initialization,
    /// Caller identity and permission errors (codes 100-199).
    Authorization,
    /// Input validation errors (codes 200-299).
    Validation,
    /// Price voucher errors (codes 300-399).
    Voucher,
    /// Name lifecycle state errors (codes 400-499).
    Lifecycle,
    /// Administrative configuration errors (codes 500-599).
    Configuration,
    /// Safe-math errors (codes 700-799).
    Arithmetic,
}

/// @title  ContractError
/// @notice Canonical error enum shared by all name service contracts.
/// @dev    Codes are wire-stable. Never renumber a variant after deployment.
///         Append new variants at the end of their category block only.
///         Use the ErrorExt trait to retrieve the category and description.
///
/// Error Code Layout:
///   1  -  99  : Initialization
///   100 - 199 : Authorization
///   200 - 299 : Validation
///   300 - 399 : Voucher
///   400 - 499 : Lifecycle
///   500 - 599 : Configuration
///   700 - 799 : Arithmetic
#[contracterror]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum ContractError {
    // --- Initialization (1-99) ---
    /// Contract has not been initialized yet.
    /// Contracts: registry, controller, resolver
    NotInitialized = 1,

    /// Contract has already been initialized and cannot be re-initialized.
    /// Contracts: registry, controller, resolver
    AlreadyInitialized = 2,

    // --- Authorization (100-199) ---
    /// Caller is not the admin.
    /// Contracts: registry, controller, resolver
    NotAdmin = 100,

    /// Caller is not the address privileged to drive this contract
    /// (the registry and resolver only accept their configured controller).
    /// Contracts: registry, resolver
    InvalidCaller = 101,

    /// Caller is neither the name owner nor the delegated domain manager.
    /// Contracts: controller
    Unauthorized = 102,

    // --- Validation (200-299) ---
    /// Label is too short or does not fit the accepted format.
    /// Contracts: controller
    InvalidName = 200,

    /// Registration duration is below the configured minimum.
    /// Contracts: controller
    TooShortDuration = 201,

    /// Batched call list is empty.
    /// Contracts: controller
    EmptyBatch = 202,

    // --- Voucher (300-399) ---
    /// The voucher deadline lies in the past.
    /// Contracts: controller
    ExpiredDeadline = 300,

    /// The voucher key has already been consumed by a registration or
    /// renewal and can never be used again.
    /// Contracts: controller
    UsedKey = 301,

    /// The voucher signature does not recover to the configured oracle key.
    /// Contracts: controller
    InvalidOracle = 302,

    // --- Lifecycle (400-499) ---
    /// Registration requires the name to be available, but it is still
    /// active or inside its grace period.
    /// Contracts: registry
    UnexpiredId = 400,

    /// Renewal requires a claimed name, but the name is available
    /// (never registered, or expired past its grace period).
    /// Contracts: registry
    ExpiredId = 401,

    /// Ownership read on a name that is not strictly active.
    /// Contracts: registry
    InvalidId = 402,

    // --- Configuration (500-599) ---
    /// Attempted update of an admin-managed value to its current value.
    /// Contracts: registry, controller, resolver
    UnchangedData = 500,

    // --- Arithmetic (700-799) ---
    /// Integer overflow detected during a checked arithmetic operation.
    /// Contracts: registry
    Overflow = 700,
}

/// @title  ErrorExt
/// @notice Provides category() and description() on every ContractError variant.
/// @dev    Use this for structured logging, monitoring, and off-chain display.
pub trait ErrorExt {
    /// @return The ErrorCategory bucket this error belongs to.
    fn category(&self) -> ErrorCategory;

    /// @return A static string description safe for logging or display.
    fn description(&self) -> &'static str;
}

impl ErrorExt for ContractError {
    fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized | ContractError::AlreadyInitialized => {
                ErrorCategory::Initialization
            }
            ContractError::NotAdmin
            | ContractError::InvalidCaller
            | ContractError::Unauthorized => ErrorCategory::Authorization,

            ContractError::InvalidName
            | ContractError::TooShortDuration
            | ContractError::EmptyBatch => ErrorCategory::Validation,

            ContractError::ExpiredDeadline
            | ContractError::UsedKey
            | ContractError::InvalidOracle => ErrorCategory::Voucher,

            ContractError::UnexpiredId
            | ContractError::ExpiredId
            | ContractError::InvalidId => ErrorCategory::Lifecycle,

            ContractError::UnchangedData => ErrorCategory::Configuration,

            ContractError::Overflow => ErrorCategory::Arithmetic,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract has already been initialized",
            ContractError::NotAdmin => "Caller is not the admin",
            ContractError::InvalidCaller => "Caller is not the configured controller",
            ContractError::Unauthorized => {
                "Caller is neither the name owner nor the domain manager"
            }
            ContractError::InvalidName => "Label is too short or malformed",
            ContractError::TooShortDuration => "Duration is below the registration minimum",
            ContractError::EmptyBatch => "Batched call list is empty",
            ContractError::ExpiredDeadline => "Voucher deadline has passed",
            ContractError::UsedKey => "Voucher key has already been consumed",
            ContractError::InvalidOracle => "Signature does not recover to the oracle",
            ContractError::UnexpiredId => "Name is still active or in its grace period",
            ContractError::ExpiredId => "Name is available and cannot be renewed",
            ContractError::InvalidId => "Name has no currently valid owner",
            ContractError::UnchangedData => "New value equals the current value",
            ContractError::Overflow => "Integer overflow in checked arithmetic",
        }
    }
}
