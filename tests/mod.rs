
// This file organizes the integration tests into a cohesive test suite.
// Each module tests a specific aspect of the application:
// - schedule_properties: Classification and aggregation through the public API
// - command_flow: CLI commands end to end on an in-memory store with a fixed clock
// - optimizer_mock: Pattern suggestions against a mocked suggestion service
