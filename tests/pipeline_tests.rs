use rdowntime::core::summary::Status;
use rdowntime::db::queries::{load_all_intervals, query_error_events, query_open_intervals};
use rdowntime::llm::client::HttpModel;
use rdowntime::llm::prompt::PromptTemplate;
use rdowntime::llm::{LanguageModel, ModelError};
use rdowntime::models::downtime::{NOT_FOUND_MARKER, Resolution};
use rdowntime::models::event_kind::EventKind;
use rdowntime::models::message::RawMessage;
use std::time::Duration;

mod common;
use common::{END_REPLY, ERROR_REPLY, START_REPLY, ScriptedModel, open_test_pool, pipeline, ts};

fn msg(text: &str, at: &str) -> RawMessage {
    RawMessage::new(text, ts(at), "Иван")
}

#[test]
fn test_start_then_end_closes_interval() {
    let mut pool = open_test_pool("pipe_start_end");
    let model = ScriptedModel::new().reply(START_REPLY).reply(END_REPLY);
    let pipe = pipeline(&model);

    let opened = pipe.process(&mut pool, &msg("Цех 12 ПА-05 стоит", "2025-03-01 08:15:00"));
    assert_eq!(opened.kind, EventKind::DowntimeStart);
    assert_eq!(opened.status, Status::Recorded);
    assert_eq!(opened.resolution, None);

    let closed = pipe.process(&mut pool, &msg("Цех 12 ПА-05 запущен", "2025-03-01 09:40:00"));
    assert_eq!(closed.kind, EventKind::DowntimeEnd);
    assert_eq!(
        closed.resolution,
        Some(Resolution::Closed {
            start: "2025-03-01 08:15:00".into(),
            end: "2025-03-01 09:40:00".into(),
        })
    );
    assert!(closed.to_string().contains("[Простой: 2025-03-01 08:15:00 - 2025-03-01 09:40:00]"));

    assert!(query_open_intervals(&pool.conn).unwrap().is_empty());
    let all = load_all_intervals(&pool.conn).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].end_time.as_deref(), Some("2025-03-01 09:40:00"));
}

#[test]
fn test_end_without_start_reports_not_found() {
    let mut pool = open_test_pool("pipe_not_found");
    let model = ScriptedModel::new().reply(END_REPLY);
    let pipe = pipeline(&model);

    let summary = pipe.process(&mut pool, &msg("ПА-05 снова работает", "2025-03-01 10:00:00"));
    assert_eq!(summary.resolution, Some(Resolution::NotFound));
    assert_eq!(summary.status, Status::Recorded);
    assert!(summary.to_string().contains(NOT_FOUND_MARKER));
    assert!(load_all_intervals(&pool.conn).unwrap().is_empty());
}

#[test]
fn test_latest_open_start_is_closed_first() {
    let mut pool = open_test_pool("pipe_last_start");
    let model = ScriptedModel::new()
        .reply(START_REPLY)
        .reply(START_REPLY)
        .reply(END_REPLY);
    let pipe = pipeline(&model);

    pipe.process(&mut pool, &msg("стоит", "2025-03-01 08:00:00"));
    pipe.process(&mut pool, &msg("опять стоит", "2025-03-01 09:00:00"));
    let closed = pipe.process(&mut pool, &msg("работает", "2025-03-01 10:00:00"));

    assert_eq!(
        closed.resolution,
        Some(Resolution::Closed {
            start: "2025-03-01 09:00:00".into(),
            end: "2025-03-01 10:00:00".into(),
        })
    );

    let open = query_open_intervals(&pool.conn).unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].start_time, "2025-03-01 08:00:00");
}

#[test]
fn test_end_only_matches_its_own_key() {
    let mut pool = open_test_pool("pipe_other_key");
    let other_start = "[Тип: Начало простоя]\n[Цех: 7]\n[Агрегат: ПА-05]";
    let model = ScriptedModel::new().reply(other_start).reply(END_REPLY);
    let pipe = pipeline(&model);

    pipe.process(&mut pool, &msg("цех 7 стоит", "2025-03-01 08:00:00"));
    let summary = pipe.process(&mut pool, &msg("цех 12 работает", "2025-03-01 09:00:00"));

    assert_eq!(summary.resolution, Some(Resolution::NotFound));
    assert_eq!(query_open_intervals(&pool.conn).unwrap().len(), 1);
}

#[test]
fn test_error_report_is_stored_with_author() {
    let mut pool = open_test_pool("pipe_error");
    let model = ScriptedModel::new().reply(ERROR_REPLY);
    let pipe = pipeline(&model);

    let summary = pipe.process(&mut pool, &msg("ЛМ-789 течёт", "2025-03-01 11:05:30"));
    assert_eq!(summary.kind, EventKind::ErrorReport);
    assert_eq!(summary.status, Status::Recorded);

    let events = query_error_events(
        &pool.conn,
        &ts("2025-03-01 00:00:00"),
        &ts("2025-03-02 00:00:00"),
    )
    .unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].workshop, "3");
    assert_eq!(events[0].unit, "ЛМ-789");
    assert_eq!(events[0].time, "2025-03-01 11:05:30");
    assert_eq!(events[0].author, "Иван");
    assert_eq!(events[0].info, "Гидравлическая утечка, требуется срочный ремонт");

    // error reports never touch the downtime ledger
    assert!(load_all_intervals(&pool.conn).unwrap().is_empty());
}

#[test]
fn test_summary_layout_for_error_report() {
    let mut pool = open_test_pool("pipe_summary_layout");
    let model = ScriptedModel::new().reply(ERROR_REPLY);
    let pipe = pipeline(&model);

    let summary = pipe.process(&mut pool, &msg("ЛМ-789 течёт", "2025-03-01 11:05:30"));
    let expected = "[Тип: Появление ошибки]\n\
                    [Цех: 3]\n\
                    [Время: 11:05:30]\n\
                    [Агрегат: ЛМ-789]\n\
                    [Информация: Гидравлическая утечка, требуется срочный ремонт]";
    assert_eq!(summary.to_string(), expected);
}

#[test]
fn test_unknown_reply_changes_nothing() {
    let mut pool = open_test_pool("pipe_unknown");
    let model = ScriptedModel::new().reply("Не могу определить тип сообщения.");
    let pipe = pipeline(&model);

    let summary = pipe.process(&mut pool, &msg("доброе утро", "2025-03-01 07:00:00"));
    assert_eq!(summary.kind, EventKind::Unknown);
    assert_eq!(summary.status, Status::Ignored);
    assert!(!summary.is_failure());
    assert!(summary.to_string().starts_with("[Тип: не определено]\n"));

    assert!(load_all_intervals(&pool.conn).unwrap().is_empty());
    let errors = query_error_events(
        &pool.conn,
        &ts("2025-01-01 00:00:00"),
        &ts("2026-01-01 00:00:00"),
    )
    .unwrap();
    assert!(errors.is_empty());
}

#[test]
fn test_model_failure_degrades_without_mutation() {
    let mut pool = open_test_pool("pipe_model_down");
    let model = ScriptedModel::new().fail(503).reply(START_REPLY);
    let pipe = pipeline(&model);

    let failed = pipe.process(&mut pool, &msg("цех 12 стоит", "2025-03-01 08:00:00"));
    assert!(matches!(failed.status, Status::ModelUnavailable(_)));
    assert!(failed.is_failure());
    assert!(failed.to_string().ends_with("[Статус: модель недоступна]"));
    assert!(load_all_intervals(&pool.conn).unwrap().is_empty());

    // the next message is processed normally
    let ok = pipe.process(&mut pool, &msg("цех 12 стоит", "2025-03-01 08:01:00"));
    assert_eq!(ok.status, Status::Recorded);
    assert_eq!(query_open_intervals(&pool.conn).unwrap().len(), 1);
}

#[test]
fn test_store_failure_is_reported_in_status() {
    let mut pool = open_test_pool("pipe_store_down");
    pool.conn.execute_batch("DROP TABLE downtimes;").unwrap();

    let model = ScriptedModel::new().reply(START_REPLY);
    let pipe = pipeline(&model);

    let summary = pipe.process(&mut pool, &msg("цех 12 стоит", "2025-03-01 08:00:00"));
    assert_eq!(summary.kind, EventKind::DowntimeStart);
    assert!(matches!(summary.status, Status::StoreFailed(_)));
    assert!(summary.to_string().contains("[Статус: не сохранено:"));
}

#[test]
fn test_prompt_embeds_trimmed_message() {
    let mut pool = open_test_pool("pipe_prompt");
    let model = ScriptedModel::new().reply(START_REPLY);
    let pipe = pipeline(&model);

    pipe.process(&mut pool, &msg("  Цех 12, ПА-05 встал  \n", "2025-03-01 08:00:00"));

    let prompts = model.prompts.borrow();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0], "Сообщение: Цех 12, ПА-05 встал");
}

#[test]
fn test_template_requires_placeholder() {
    assert!(PromptTemplate::new("Классифицируй сообщение.").is_err());

    let default = PromptTemplate::default();
    let rendered = default.render("Цех 5 стоит");
    assert!(rendered.contains("Цех 5 стоит"));
    assert!(!rendered.contains("{input_text}"));
}

#[test]
fn test_http_model_without_token_fails_before_sending() {
    let model = HttpModel::new(
        "http://127.0.0.1:9/v1/chat/completions",
        "test-model",
        None,
        Duration::from_secs(1),
    )
    .unwrap();

    let err = model.complete("Цех 1 стоит", 16).unwrap_err();
    assert!(matches!(err, ModelError::MissingToken(_)));
}
