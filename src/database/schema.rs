// SQL schema for the violation catalog

pub const VIOLATIONS_SCHEMA: &str = include_str!("../../migrations/001_violations.sql");
