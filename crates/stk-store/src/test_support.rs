//! Shared test utilities for stk-store unit tests.
