mod config_tests;
mod ranking_flow_tests;
mod tournament_flow_tests;
