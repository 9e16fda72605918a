pub mod clear;
pub mod init;
pub mod ls;
pub mod show;
