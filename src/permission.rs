// 该文件是 Kanjian （看见） 项目的一部分。
// src/permission.rs - 媒体库访问权限
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

use std::str::FromStr;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum PermissionError {
  #[error("未知的权限状态: {0}")]
  UnknownStatus(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionKind {
  MediaLibrary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
  Granted,
  Denied,
  Undetermined,
}

impl PermissionStatus {
  pub fn is_granted(self) -> bool {
    self == PermissionStatus::Granted
  }
}

impl FromStr for PermissionStatus {
  type Err = PermissionError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "granted" => Ok(PermissionStatus::Granted),
      "denied" => Ok(PermissionStatus::Denied),
      "undetermined" => Ok(PermissionStatus::Undetermined),
      other => Err(PermissionError::UnknownStatus(other.to_string())),
    }
  }
}

#[async_trait]
pub trait PermissionGate: Send + Sync {
  async fn ask(&self, kind: PermissionKind) -> Result<PermissionStatus, PermissionError>;
}

/// 平台无需显式授权时使用，不弹出任何请求
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPermissionRequired;

#[async_trait]
impl PermissionGate for NoPermissionRequired {
  async fn ask(&self, kind: PermissionKind) -> Result<PermissionStatus, PermissionError> {
    debug!("平台无需请求权限: {:?}", kind);
    Ok(PermissionStatus::Granted)
  }
}

/// 总是返回固定状态
#[derive(Debug, Clone, Copy)]
pub struct FixedPermission(pub PermissionStatus);

#[async_trait]
impl PermissionGate for FixedPermission {
  async fn ask(&self, _kind: PermissionKind) -> Result<PermissionStatus, PermissionError> {
    Ok(self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_status() {
    assert_eq!(
      "granted".parse::<PermissionStatus>().unwrap(),
      PermissionStatus::Granted
    );
    assert_eq!(
      "denied".parse::<PermissionStatus>().unwrap(),
      PermissionStatus::Denied
    );
    assert!("maybe".parse::<PermissionStatus>().is_err());
  }

  #[tokio::test]
  async fn no_permission_required_grants() {
    let status = NoPermissionRequired
      .ask(PermissionKind::MediaLibrary)
      .await
      .unwrap();
    assert!(status.is_granted());
  }
}
