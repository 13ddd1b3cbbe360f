// 该文件是 Kanjian （看见） 项目的一部分。
// src/input/picker.rs - 选图器实现
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

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{debug, info};

use super::{ImagePicker, ImageRef, PickResult, PickerError, PickerOptions};

/// 按行读取图片路径的选图器，空行表示取消
pub struct LinePicker<R> {
  lines: tokio::sync::Mutex<Lines<R>>,
  prompt: bool,
}

pub type StdinPicker = LinePicker<BufReader<Stdin>>;

impl LinePicker<BufReader<Stdin>> {
  pub fn stdin() -> Self {
    LinePicker::new(BufReader::new(tokio::io::stdin())).with_prompt(true)
  }
}

impl<R: AsyncBufRead + Unpin> LinePicker<R> {
  pub fn new(reader: R) -> Self {
    Self {
      lines: tokio::sync::Mutex::new(reader.lines()),
      prompt: false,
    }
  }

  pub fn with_prompt(mut self, prompt: bool) -> Self {
    self.prompt = prompt;
    self
  }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> ImagePicker for LinePicker<R> {
  async fn launch(&self, options: &PickerOptions) -> Result<PickResult, PickerError> {
    if self.prompt {
      println!(
        "请输入图片路径（媒体类型: {:?}, 允许编辑: {}, 宽高比: {}:{}），留空取消:",
        options.media_types, options.allows_editing, options.aspect[0], options.aspect[1]
      );
    }

    let mut lines = self.lines.lock().await;
    let line = lines.next_line().await?.ok_or(PickerError::Closed)?;
    let line = line.trim();

    if line.is_empty() {
      debug!("选图已取消");
      return Ok(PickResult::Cancelled);
    }

    info!("已选择图片: {}", line);
    Ok(PickResult::Picked(ImageRef::new(line)))
  }
}

/// 依次返回预设图片的选图器，用尽后视为取消
#[derive(Debug, Default)]
pub struct FixedPicker {
  queue: Mutex<VecDeque<ImageRef>>,
  last_options: Mutex<Option<PickerOptions>>,
}

impl FixedPicker {
  pub fn new(images: impl IntoIterator<Item = ImageRef>) -> Self {
    Self {
      queue: Mutex::new(images.into_iter().collect()),
      last_options: Mutex::new(None),
    }
  }

  pub fn last_options(&self) -> Option<PickerOptions> {
    self
      .last_options
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .clone()
  }
}

#[async_trait]
impl ImagePicker for FixedPicker {
  async fn launch(&self, options: &PickerOptions) -> Result<PickResult, PickerError> {
    *self
      .last_options
      .lock()
      .unwrap_or_else(PoisonError::into_inner) = Some(options.clone());

    let next = self
      .queue
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .pop_front();

    Ok(match next {
      Some(image) => PickResult::Picked(image),
      None => PickResult::Cancelled,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn line_picker_reads_paths_and_blank_cancels() {
    let picker = LinePicker::new("cat.jpg\n\n  dog.png  \n".as_bytes());
    let options = PickerOptions::default();

    assert_eq!(
      picker.launch(&options).await.unwrap(),
      PickResult::Picked(ImageRef::new("cat.jpg"))
    );
    assert_eq!(picker.launch(&options).await.unwrap(), PickResult::Cancelled);
    assert_eq!(
      picker.launch(&options).await.unwrap(),
      PickResult::Picked(ImageRef::new("dog.png"))
    );
    assert!(matches!(
      picker.launch(&options).await,
      Err(PickerError::Closed)
    ));
  }

  #[tokio::test]
  async fn fixed_picker_passes_options_through() {
    let picker = FixedPicker::new([ImageRef::new("a.png")]);
    let options = PickerOptions {
      aspect: [16, 9],
      allows_editing: false,
      ..PickerOptions::default()
    };

    assert_eq!(
      picker.launch(&options).await.unwrap(),
      PickResult::Picked(ImageRef::new("a.png"))
    );
    assert_eq!(picker.last_options(), Some(options.clone()));
    assert_eq!(picker.launch(&options).await.unwrap(), PickResult::Cancelled);
  }
}
