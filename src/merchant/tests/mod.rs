//! Unit tests for the merchant context.
