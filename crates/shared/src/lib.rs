//! Process bootstrap shared by planner binaries

pub mod bootstrap;
