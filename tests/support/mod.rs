#![allow(dead_code)]

pub mod meshes;
