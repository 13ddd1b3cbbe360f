// 该文件是 Kanjian （看见） 项目的一部分。
// src/input/file_fetch.rs - 本地文件字节读取
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

use async_trait::async_trait;
use tracing::{debug, error};
use url::Url;

use super::{Fetch, FetchError};

const FILE_FETCH_SCHEME: &str = "file";

/// 读取 `file://` 地址指向的图像字节
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFetch;

impl FileFetch {
  fn local_path(url: &Url) -> Result<String, FetchError> {
    if url.scheme() != FILE_FETCH_SCHEME {
      error!(
        "URI scheme mismatch: expected '{}', found '{}'",
        FILE_FETCH_SCHEME,
        url.scheme()
      );
      return Err(FetchError::SchemeMismatch {
        expected: FILE_FETCH_SCHEME,
        found: url.scheme().to_string(),
      });
    }

    let path = urlencoding::decode(url.path()).map_err(|e| FetchError::Resolve {
      uri: url.to_string(),
      reason: e.to_string(),
    })?;
    Ok(path.into_owned())
  }
}

#[async_trait]
impl Fetch for FileFetch {
  async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
    let path = Self::local_path(url)?;
    let bytes = tokio::fs::read(&path).await?;
    debug!("读取图像文件: {} ({} 字节)", path, bytes.len());
    Ok(bytes)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn reads_local_file() {
    let path = std::env::temp_dir().join("kanjian file fetch.bin");
    std::fs::write(&path, [1u8, 2, 3]).unwrap();
    let url = Url::from_file_path(&path).unwrap();

    let bytes = FileFetch.fetch(&url).await.unwrap();

    assert_eq!(bytes, vec![1, 2, 3]);
    let _ = std::fs::remove_file(path);
  }

  #[tokio::test]
  async fn rejects_other_schemes() {
    let url = Url::parse("https://example.com/cat.jpg").unwrap();
    assert!(matches!(
      FileFetch.fetch(&url).await,
      Err(FetchError::SchemeMismatch { .. })
    ));
  }

  #[tokio::test]
  async fn missing_file_is_io_error() {
    let url = Url::parse("file:///definitely/not/here/kanjian.jpg").unwrap();
    assert!(matches!(
      FileFetch.fetch(&url).await,
      Err(FetchError::IoError(_))
    ));
  }
}
