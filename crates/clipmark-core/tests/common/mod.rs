#![allow(dead_code)]

pub mod page_server;
