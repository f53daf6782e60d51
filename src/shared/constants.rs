pub const CONFIG_DIRECTORY: &str = "./config";
