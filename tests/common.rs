#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDateTime;
use rdowntime::core::pipeline::Pipeline;
use rdowntime::db::initialize::open_db;
use rdowntime::db::pool::DbPool;
use rdowntime::llm::prompt::PromptTemplate;
use rdowntime::llm::{LanguageModel, ModelError};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const START_REPLY: &str = "[Тип: Начало простоя]\n[Цех: 12]\n[Агрегат: ПА-05]";
pub const END_REPLY: &str = "[Тип: Устранение простоя]\n[Цех: 12]\n[Агрегат: ПА-05]";
pub const ERROR_REPLY: &str = "[Тип: Появление ошибки]\n[Цех: 3]\n[Агрегат: ЛМ-789]\n[Информация: Гидравлическая утечка, требуется срочный ремонт]";

/// Binary under test, isolated from the real home directory and token.
pub fn rdt(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("rdowntime");
    cmd.env("HOME", home)
        .env("APPDATA", home)
        .env_remove("HF_TOKEN")
        .env_remove("RUST_LOG")
        .current_dir(home);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rdowntime.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Fresh, empty directory used as $HOME by CLI tests.
pub fn temp_home(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rdowntime_home", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp home");
    path
}

/// Initialized database with the current schema.
pub fn open_test_pool(name: &str) -> DbPool {
    let db_path = setup_test_db(name);
    open_db(&db_path).expect("open test db")
}

pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").expect("valid timestamp")
}

/// Model that replays queued replies and records every prompt it was sent.
#[derive(Default)]
pub struct ScriptedModel {
    replies: RefCell<VecDeque<Result<String, ModelError>>>,
    pub prompts: RefCell<Vec<String>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: &str) -> Self {
        self.replies.borrow_mut().push_back(Ok(text.to_string()));
        self
    }

    pub fn fail(self, status: u16) -> Self {
        self.replies.borrow_mut().push_back(Err(ModelError::Api {
            status,
            message: "service unavailable".into(),
        }));
        self
    }
}

impl LanguageModel for ScriptedModel {
    fn complete(&self, prompt: &str, _max_reply_tokens: u32) -> Result<String, ModelError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(ModelError::EmptyContent))
    }
}

pub fn pipeline(model: &ScriptedModel) -> Pipeline<&ScriptedModel> {
    let template = PromptTemplate::new("Сообщение: {input_text}").expect("valid template");
    Pipeline::new(model, template, 250)
}
