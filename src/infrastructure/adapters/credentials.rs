//! Env Credentials - 从进程环境变量读取凭据

use crate::application::ports::CredentialSourcePort;

/// 环境变量凭据来源
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvCredentialSource;

impl CredentialSourcePort for EnvCredentialSource {
    fn get_variable(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}
