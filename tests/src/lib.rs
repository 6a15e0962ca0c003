#![cfg(test)]

mod gate_flow;
mod handoff_exit;
