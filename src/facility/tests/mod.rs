//! Unit tests for the facility context.
