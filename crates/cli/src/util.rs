use runwatch_core::models::Repository;
use typed_path::Utf8NativePathBuf;

// For argp::FromArgs
pub fn native_path(value: &str) -> Result<Utf8NativePathBuf, String> {
    Ok(Utf8NativePathBuf::from(value))
}

// For argp::FromArgs
pub fn repository(value: &str) -> Result<Repository, String> { value.parse() }
