pub mod audit_quota;
