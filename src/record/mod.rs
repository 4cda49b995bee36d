//! Beneficiary land records and source-feed ingestion

mod data;
pub mod loader;

pub use data::{
    AgreementDateInput, IdentityFields, InputPolicy, LandRecord, MutationRef, OwnerType,
    ANNUITY_YEARS, NULL_SENTINEL,
};
pub use loader::{
    load_raw_records, load_raw_records_from_reader, validate_records, RawRecord,
    HISTORICAL_PAYMENT_COLUMNS,
};
