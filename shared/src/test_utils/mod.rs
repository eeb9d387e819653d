pub mod mock_gateway;
pub mod test_logging;
