//! Unit tests for the batch context.
