//! LLM 服务 - 业务能力层
//!
//! 只负责"把提示词发给模型、拿回文本"这一件事，不关心流程
//!
//! ## 技术栈
//! - 首选直连 HTTP（`reqwest`），兼容 OpenAI API 的服务端点
//! - 直连失败时退回 `async-openai` SDK 再试一次
//! - 两条通道共用同一套密钥 / 端点 / 模型配置

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppResult, LlmError};

/// 两条通道共用的系统消息
const SYSTEM_MESSAGE: &str =
    "You are an AI assistant that analyzes Jupyter notebooks for mathematical problems.";

/// 采样温度：分析类任务要的是稳定输出，不是创造性
const TEMPERATURE: f32 = 0.3;

/// SDK 通道的回复长度上限
const MAX_TOKENS: u32 = 4000;

/// LLM 服务
///
/// 职责：
/// - 把构建好的提示词发给模型
/// - 返回模型的原始文本回复
/// - 不解析回复内容
/// - 不关心流程顺序
pub struct LlmService {
    http: reqwest::Client,
    sdk: Client<OpenAIConfig>,
    api_key: String,
    api_base_url: String,
    model_name: String,
    timeout_secs: u64,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| LlmError::HttpRequestFailed {
                endpoint: config.llm_api_base_url.clone(),
                source: Box::new(e),
            })?;

        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);
        let sdk = Client::with_config(openai_config);

        Ok(Self {
            http,
            sdk,
            api_key: config.llm_api_key.clone(),
            api_base_url: config.llm_api_base_url.clone(),
            model_name: config.llm_model_name.clone(),
            timeout_secs: config.request_timeout_secs,
        })
    }

    /// 发送分析提示词，返回模型的原始文本回复
    ///
    /// 先走直连 HTTP，失败后记警告并退回 SDK；两条通道都失败
    /// 才返回错误。
    pub async fn analyze(&self, prompt: &str) -> AppResult<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("提示词长度: {} 字符", prompt.len());

        match self.analyze_via_http(prompt).await {
            Ok(content) => {
                info!("✅ 直连 HTTP 通道调用成功");
                return Ok(content);
            }
            Err(e) => {
                warn!("直连 HTTP 通道失败，退回 SDK: {}", e);
            }
        }

        match self.analyze_via_sdk(prompt).await {
            Ok(content) => {
                info!("✅ SDK 通道调用成功");
                Ok(content)
            }
            Err(e) => {
                warn!("SDK 通道同样失败: {}", e);
                Err(LlmError::BothTransportsFailed.into())
            }
        }
    }

    /// 直连 HTTP 通道
    async fn analyze_via_http(&self, prompt: &str) -> AppResult<String> {
        let endpoint = format!("{}/chat/completions", self.api_base_url);

        let payload = json!({
            "model": self.model_name,
            "messages": [
                { "role": "system", "content": SYSTEM_MESSAGE },
                { "role": "user", "content": prompt },
            ],
            "temperature": TEMPERATURE,
        });

        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout {
                        seconds: self.timeout_secs,
                    }
                } else {
                    LlmError::HttpRequestFailed {
                        endpoint: endpoint.clone(),
                        source: Box::new(e),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::BadStatus {
                endpoint,
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let body: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| LlmError::HttpRequestFailed {
                    endpoint: endpoint.clone(),
                    source: Box::new(e),
                })?;

        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| LlmError::EmptyContent {
                model: self.model_name.clone(),
            })?;

        Ok(content)
    }

    /// SDK 后备通道
    async fn analyze_via_sdk(&self, prompt: &str) -> AppResult<String> {
        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(SYSTEM_MESSAGE)
            .build()
            .map_err(|e| LlmError::SdkCallFailed {
                model: self.model_name.clone(),
                source: Box::new(e),
            })?;
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| LlmError::SdkCallFailed {
                model: self.model_name.clone(),
                source: Box::new(e),
            })?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![
                ChatCompletionRequestMessage::System(system_msg),
                ChatCompletionRequestMessage::User(user_msg),
            ])
            .temperature(TEMPERATURE)
            .max_tokens(MAX_TOKENS)
            .build()
            .map_err(|e| LlmError::SdkCallFailed {
                model: self.model_name.clone(),
                source: Box::new(e),
            })?;

        let response = tokio::time::timeout(
            Duration::from_secs(self.timeout_secs),
            self.sdk.chat().create(request),
        )
        .await
        .map_err(|_| LlmError::Timeout {
            seconds: self.timeout_secs,
        })?
        .map_err(|e| LlmError::SdkCallFailed {
            model: self.model_name.clone(),
            source: Box::new(e),
        })?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| LlmError::EmptyContent {
                model: self.model_name.clone(),
            })?;

        Ok(content)
    }
}
