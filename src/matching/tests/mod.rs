mod common;
mod exclusion;
mod explain;
mod ranking;
