/// Directory helpers used while bootstrapping the server
pub struct FileSystem;
