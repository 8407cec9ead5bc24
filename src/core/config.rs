use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub swagger: SwaggerConfig,
    pub classifier: ClassifierConfig,
    pub analytics: AnalyticsConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Which classifier (if any) is consulted at intake to fill `risco`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierProvider {
    None,
    Keyword,
    HuggingFace,
}

/// Configuration for the optional report classifier
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub provider: ClassifierProvider,
    /// Bearer token for the Hugging Face inference API
    pub api_token: Option<String>,
    /// Text sentiment model endpoint
    pub text_model_url: String,
    /// Zero-shot image classification endpoint
    pub image_model_url: String,
    pub timeout: Duration,
}

/// Configuration for report aggregation
#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    /// Offset from UTC used when bucketing reports by hour of day
    pub utc_offset_minutes: i32,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            classifier: ClassifierConfig::from_env()?,
            analytics: AnalyticsConfig::from_env()?,
        })
    }
}

impl AppConfig {
    // Inline base64 photos travel in the JSON body
    pub const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 10 * 1024 * 1024; // 10MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    // Default values for database connection pool (conservative defaults for small-medium apps)
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Help City API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Citizen reports and public safety dashboard API".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl ClassifierProvider {
    pub fn parse(value: &str) -> Result<Self, String> {
        match value.trim().to_lowercase().as_str() {
            "" | "none" | "disabled" => Ok(Self::None),
            "keyword" => Ok(Self::Keyword),
            "huggingface" | "hf" => Ok(Self::HuggingFace),
            other => Err(format!(
                "CLASSIFIER_PROVIDER must be one of none, keyword, huggingface (got '{}')",
                other
            )),
        }
    }
}

impl ClassifierConfig {
    const DEFAULT_TEXT_MODEL_URL: &'static str =
        "https://api-inference.huggingface.co/models/distilbert-base-uncased-finetuned-sst-2-english";
    const DEFAULT_IMAGE_MODEL_URL: &'static str =
        "https://api-inference.huggingface.co/pipeline/zero-shot-image-classification/openai/clip-vit-base-patch32";
    const DEFAULT_TIMEOUT_SECS: u64 = 10;

    pub fn from_env() -> Result<Self, String> {
        let provider = ClassifierProvider::parse(
            &env::var("CLASSIFIER_PROVIDER").unwrap_or_else(|_| "none".to_string()),
        )?;

        let api_token = env::var("HUGGINGFACE_API_TOKEN")
            .ok()
            .filter(|s| !s.is_empty());

        if provider == ClassifierProvider::HuggingFace && api_token.is_none() {
            return Err(
                "HUGGINGFACE_API_TOKEN is required when CLASSIFIER_PROVIDER=huggingface"
                    .to_string(),
            );
        }

        let text_model_url = env::var("HF_TEXT_MODEL_URL")
            .unwrap_or_else(|_| Self::DEFAULT_TEXT_MODEL_URL.to_string());
        let image_model_url = env::var("HF_IMAGE_MODEL_URL")
            .unwrap_or_else(|_| Self::DEFAULT_IMAGE_MODEL_URL.to_string());

        let timeout_secs = env::var("CLASSIFIER_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "CLASSIFIER_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            provider,
            api_token,
            text_model_url,
            image_model_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl AnalyticsConfig {
    pub fn from_env() -> Result<Self, String> {
        let utc_offset_minutes = env::var("ANALYTICS_UTC_OFFSET_MINUTES")
            .unwrap_or_else(|_| "0".to_string())
            .parse::<i32>()
            .map_err(|_| "ANALYTICS_UTC_OFFSET_MINUTES must be a valid number".to_string())?;

        Ok(Self {
            utc_offset_minutes: check_utc_offset(utc_offset_minutes)?,
        })
    }
}

/// Offset must stay inside one day
fn check_utc_offset(minutes: i32) -> Result<i32, String> {
    if minutes.unsigned_abs() >= 24 * 60 {
        return Err("ANALYTICS_UTC_OFFSET_MINUTES must be within +/- 1439".to_string());
    }
    Ok(minutes)
}
