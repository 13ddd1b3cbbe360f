// 该文件是 Kanjian （看见） 项目的一部分。
// src/args.rs - 项目参数配置
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

use clap::Parser;
use url::Url;

use kanjian::{
  input::{MediaTypes, PickerOptions},
  permission::PermissionStatus,
  screen::StalePolicy,
};

/// Kanjian 检测界面参数配置
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 回放模型地址，例如 replay:///path/to/predictions.json?min_score=0.5
  #[arg(long, value_name = "MODEL")]
  pub model: Url,

  /// 媒体库权限状态（granted / denied / undetermined），不指定则平台无需授权
  #[arg(long, value_name = "STATUS")]
  pub permission: Option<PermissionStatus>,

  /// 新旧检测结果的取舍方式
  #[arg(long, value_enum, default_value_t = StalePolicy::LatestSelection)]
  pub stale_policy: StalePolicy,

  /// 可选择的媒体类型
  #[arg(long, value_enum, default_value_t = MediaTypes::All)]
  pub media_types: MediaTypes,

  /// 选图宽高比
  #[arg(long, num_args = 2, value_names = ["W", "H"], default_values_t = [4, 3])]
  pub aspect: Vec<u32>,

  /// 禁止选图时编辑
  #[arg(long)]
  pub no_editing: bool,

  /// 运行时初始化延迟（毫秒）
  #[arg(long, default_value = "0", value_name = "MILLIS")]
  pub runtime_delay_ms: u64,

  /// 每次检测完成后的输出路径（console://、json:///out.json、image:///out.png）
  #[arg(long, value_name = "OUTPUT")]
  pub output: Option<Url>,
}

impl Args {
  pub fn picker_options(&self) -> PickerOptions {
    let defaults = PickerOptions::default();
    let aspect = match self.aspect.as_slice() {
      [w, h] => [*w, *h],
      _ => defaults.aspect,
    };

    PickerOptions {
      media_types: self.media_types,
      allows_editing: !self.no_editing,
      aspect,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_match_picker_defaults() {
    let args = Args::try_parse_from(["kanjian", "--model", "replay:///p.json"]).unwrap();
    assert_eq!(args.picker_options(), PickerOptions::default());
    assert_eq!(args.stale_policy, StalePolicy::LatestSelection);
  }

  #[test]
  fn picker_flags_reach_picker_options() {
    let args = Args::try_parse_from([
      "kanjian",
      "--model",
      "replay:///p.json",
      "--media-types",
      "images",
      "--aspect",
      "16",
      "9",
      "--no-editing",
    ])
    .unwrap();

    assert_eq!(
      args.picker_options(),
      PickerOptions {
        media_types: MediaTypes::Images,
        allows_editing: false,
        aspect: [16, 9],
      }
    );
  }
}
