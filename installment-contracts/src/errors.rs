use soroban_sdk::contracterror;

/// Custom error types for the installment contract
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum InstallmentError {
    // Validation errors (1000-1099)
    InvalidAmount = 1000,
    InvalidPrice = 1001,
    InvalidPercentage = 1002,
    InvalidInstallmentCount = 1003,
    InvalidInterval = 1004,
    InvalidUri = 1005,

    // Lookup errors (1100-1199)
    ItemNotFound = 1100,
    PlanNotFound = 1101,

    // Plan state errors (1200-1299)
    PlanAlreadyActive = 1200,
    PlanNotActive = 1201,
    PlanDefaulted = 1202,
    PlanNotDefaulted = 1203,
    NoInstallmentsRemaining = 1204,
    GracePeriodNotElapsed = 1205,
    NothingToReclaim = 1206,
    ProtocolPaused = 1207,
    AlreadyInitialized = 1208,
    NotInitialized = 1209,

    // Payment errors (1300-1399)
    InsufficientPayment = 1300,
    ArithmeticOverflow = 1301,

    // Authorization errors (1400-1499)
    NotAdmin = 1400,

    // Reentrancy errors (1500-1599)
    OperationInProgress = 1500,

    // External dependency errors (1600-1699)
    OracleUnavailable = 1600,
    CustodyTransferFailed = 1601,
    PaymentTransferFailed = 1602,
    CustodyUnavailable = 1603,
}
