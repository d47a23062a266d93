pub mod anthropic_service;
