//! 入力フォームの検証
//!
//! いずれの検証もネットワーク呼び出しの前に実行します。

use std::sync::OnceLock;

use regex::Regex;

/// 履歴書ファイルの上限サイズ（10MB）
pub const MAX_RESUME_SIZE: u64 = 10 * 1024 * 1024;

/// 受け付けるMIMEタイプ
pub const PDF_MIME: &str = "application/pdf";

/// パスワードの最小文字数
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// クライアント側の検証エラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Full name is required")]
    NameRequired,

    #[error("Email is required")]
    EmailRequired,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Password is required")]
    PasswordRequired,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Please select a file")]
    NoFile,

    #[error("Only PDF files are allowed")]
    NotPdf,

    #[error("File size must be less than 10MB")]
    FileTooLarge,
}

/// フォーム送信時のエラー（クライアント側検証 or API）
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] crate::api::ApiError),
}

impl FormError {
    /// 画面に表示する1行の文言
    pub fn user_message(&self) -> String {
        match self {
            FormError::Invalid(e) => e.to_string(),
            FormError::Api(e) => e.user_message(),
        }
    }
}

/// 新規登録フォーム
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// ログインフォーム
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// 選択された履歴書ファイル
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    /// ファイル名の拡張子からMIMEタイプを決定して作成
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime = mime_from_name(&name).to_string();
        Self { name, mime, bytes }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// "1.2 MB" 形式の表示用サイズ
    pub fn formatted_size(&self) -> String {
        format!("{:.2} MB", self.size() as f64 / (1024.0 * 1024.0))
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
    })
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if !email_regex().is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// 新規登録フォームの検証
pub fn validate_signup(form: &SignupForm) -> Result<(), ValidationError> {
    if form.full_name.trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }
    validate_email(&form.email)?;
    if form.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    if form.password != form.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// ログインフォームの検証
pub fn validate_login(form: &LoginForm) -> Result<(), ValidationError> {
    validate_email(&form.email)?;
    if form.password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    Ok(())
}

/// 履歴書ファイルの検証（PDFのみ、10MB以下）
pub fn validate_resume_file(file: &ResumeFile) -> Result<(), ValidationError> {
    if file.mime != PDF_MIME {
        return Err(ValidationError::NotPdf);
    }
    if file.size() > MAX_RESUME_SIZE {
        return Err(ValidationError::FileTooLarge);
    }
    Ok(())
}

/// 拡張子からMIMEタイプを推定
pub fn mime_from_name(name: &str) -> &'static str {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => PDF_MIME,
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(password: &str) -> SignupForm {
        SignupForm {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: password.to_string(),
            confirm_password: password.to_string(),
        }
    }

    #[test]
    fn test_short_password_message() {
        let error = validate_signup(&signup("12345")).unwrap_err();
        assert_eq!(error.to_string(), "Password must be at least 6 characters");
    }

    #[test]
    fn test_valid_signup() {
        assert_eq!(validate_signup(&signup("123456")), Ok(()));
    }

    #[test]
    fn test_signup_field_order() {
        let mut form = signup("123456");
        form.full_name = "  ".to_string();
        assert_eq!(validate_signup(&form), Err(ValidationError::NameRequired));

        let mut form = signup("123456");
        form.email = "not-an-email".to_string();
        assert_eq!(validate_signup(&form), Err(ValidationError::InvalidEmail));

        let mut form = signup("123456");
        form.confirm_password = "654321".to_string();
        assert_eq!(validate_signup(&form), Err(ValidationError::PasswordMismatch));
    }

    #[test]
    fn test_login_validation() {
        let form = LoginForm {
            email: String::new(),
            password: "x".to_string(),
        };
        assert_eq!(validate_login(&form), Err(ValidationError::EmailRequired));

        let form = LoginForm {
            email: "a@b.co".to_string(),
            password: String::new(),
        };
        assert_eq!(validate_login(&form), Err(ValidationError::PasswordRequired));
    }

    #[test]
    fn test_resume_must_be_pdf() {
        let file = ResumeFile::new("resume.docx", vec![0; 10]);
        assert_eq!(validate_resume_file(&file), Err(ValidationError::NotPdf));

        let file = ResumeFile::new("Resume.PDF", vec![0; 10]);
        assert_eq!(validate_resume_file(&file), Ok(()));
    }

    #[test]
    fn test_resume_size_limit() {
        let file = ResumeFile::new("resume.pdf", vec![0; MAX_RESUME_SIZE as usize]);
        assert_eq!(validate_resume_file(&file), Ok(()));

        let file = ResumeFile::new("resume.pdf", vec![0; MAX_RESUME_SIZE as usize + 1]);
        assert_eq!(validate_resume_file(&file), Err(ValidationError::FileTooLarge));
    }
}
