// models/src/departments.rs

/// The hospital departments a clinical action can be routed to. Order is
/// part of the API contract and must be preserved.
pub const DEPARTMENTS: [&str; 7] = [
    "Doctor",
    "Nursing",
    "Diagnostics",
    "Pharmacy",
    "Referrals",
    "Laboratory",
    "Radiology",
];
