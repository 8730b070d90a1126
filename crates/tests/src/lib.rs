//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约快照测试
//! - 模拟 e2e 测试（经由插件生命周期，无需 Slack）

#[cfg(test)]
mod contract_tests {
    use contracts::{BatchOutcome, PLUGIN_NAME};
    use plugin::{FlbStatus, PluginRegistration};

    #[test]
    fn test_plugin_identity() {
        let registration = PluginRegistration::default();
        assert_eq!(registration.name, PLUGIN_NAME);
        assert_eq!(PLUGIN_NAME, "slack_personal_notifier");
    }

    #[test]
    fn test_status_codes_match_host() {
        assert_eq!(FlbStatus::Error.code(), 0);
        assert_eq!(FlbStatus::Ok.code(), 1);
        assert_eq!(FlbStatus::Retry.code(), 2);

        assert_eq!(FlbStatus::from(BatchOutcome::Delivered), FlbStatus::Ok);
        assert_eq!(FlbStatus::from(BatchOutcome::DeliveredWithSkips), FlbStatus::Ok);
        assert_eq!(FlbStatus::from(BatchOutcome::RetryRequested), FlbStatus::Retry);
    }
}

#[cfg(test)]
mod e2e_tests {
    use config_loader::{ConfigLoader, Settings};
    use contracts::{BatchOutcome, FieldValue, LogEvent, RawTimestamp, Record};
    use dispatcher::MockNotifier;
    use plugin::{FlbStatus, PluginInstance};

    fn settings() -> Settings {
        [
            ("token", "xoxb-test"),
            ("user_key", "user"),
            ("users", r#"{"alice": "U123", "carol": "U789"}"#),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn event(user: &str, msg: &str) -> LogEvent {
        LogEvent::new(
            RawTimestamp::UnixSeconds(1_700_000_000),
            [("user", user), ("msg", msg)].into_iter().collect(),
        )
    }

    fn start(mock: MockNotifier) -> PluginInstance<MockNotifier> {
        let mut instance = PluginInstance::register();
        assert_eq!(
            instance.init_with(&settings(), move |_| Ok(mock)),
            FlbStatus::Ok
        );
        instance
    }

    /// End-to-end test: settings -> init -> flush -> mock delivery
    ///
    /// 验证完整的数据流：
    /// 1. 配置加载并构建收件人目录
    /// 2. 记录被格式化并解析收件人
    /// 3. 私信送达对应频道
    #[test]
    fn test_e2e_example_record() {
        let mock = MockNotifier::new("mock");
        let handle = mock.clone();
        let mut instance = start(mock);

        let status = instance.flush(&[event("alice", "disk full")], "app.alerts");
        assert_eq!(status, FlbStatus::Ok);

        let sent = handle.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].channel_id, "U123");
        assert_eq!(
            sent[0].text,
            r#"["timestamp": 1700000000.000000000, {"msg"="disk full", "user"="alice"}]"#
        );

        assert_eq!(instance.exit(), FlbStatus::Ok);
    }

    #[test]
    fn test_e2e_unknown_recipient_is_skipped() {
        let mock = MockNotifier::new("mock");
        let handle = mock.clone();
        let instance = start(mock);

        let report = instance
            .output()
            .unwrap()
            .flush_report(&[event("bob", "hello")], "app.alerts");

        assert_eq!(report.outcome, BatchOutcome::DeliveredWithSkips);
        assert_eq!(report.skipped, 1);
        assert_eq!(handle.attempts(), 0);
        assert_eq!(instance.flush(&[event("bob", "hello")], "t"), FlbStatus::Ok);
    }

    #[test]
    fn test_e2e_failure_mid_batch_requests_retry() {
        // third record of five fails to send
        let mock = MockNotifier::new("mock").failing_on(2);
        let handle = mock.clone();
        let instance = start(mock);

        let batch: Vec<LogEvent> = (0..5).map(|i| event("alice", &i.to_string())).collect();
        let report = instance.output().unwrap().flush_report(&batch, "t");

        assert_eq!(report.outcome, BatchOutcome::RetryRequested);
        assert_eq!(report.sent, 2);
        assert_eq!(report.aborted_at, Some(2));
        assert_eq!(handle.attempts(), 3);
    }

    #[test]
    fn test_e2e_redelivery_repeats_sent_records() {
        let mock = MockNotifier::new("mock").failing_on(1);
        let handle = mock.clone();
        let instance = start(mock);

        let batch = vec![event("alice", "one"), event("carol", "two")];
        assert_eq!(instance.flush(&batch, "t"), FlbStatus::Retry);
        assert_eq!(instance.flush(&batch, "t"), FlbStatus::Ok);

        let channels: Vec<String> = handle.sent().into_iter().map(|m| m.channel_id).collect();
        assert_eq!(channels, vec!["U123", "U123", "U789"]);
    }

    #[test]
    fn test_e2e_mixed_batch() {
        let mock = MockNotifier::new("mock");
        let handle = mock.clone();
        let instance = start(mock);

        let mut no_user = Record::new();
        no_user.insert("msg", "orphan");
        let mut numeric_user = Record::new();
        numeric_user.insert("user", FieldValue::Integer(7));

        let batch = vec![
            event("alice", "a"),
            LogEvent::new(RawTimestamp::UnixSeconds(1), no_user),
            LogEvent::new(RawTimestamp::UnixSeconds(1), numeric_user),
            event("carol", "c"),
        ];
        let report = instance.output().unwrap().flush_report(&batch, "t");

        assert_eq!(report.outcome, BatchOutcome::DeliveredWithSkips);
        assert_eq!(report.sent, 2);
        assert_eq!(report.skipped, 2);
        assert_eq!(handle.sent().len(), 2);
    }

    #[test]
    fn test_e2e_unrecognized_timestamp_still_sent() {
        let mock = MockNotifier::new("mock");
        let handle = mock.clone();
        let instance = start(mock);

        let batch = vec![LogEvent::new(
            RawTimestamp::unrecognized("string"),
            [("user", "alice")].into_iter().collect(),
        )];
        assert_eq!(instance.flush(&batch, "t"), FlbStatus::Ok);
        assert!(handle.sent()[0].text.starts_with("[\"timestamp\": "));
    }

    #[test]
    fn test_e2e_invalid_settings_refuse_every_batch() {
        let mock = MockNotifier::new("mock");
        let handle = mock.clone();
        let mut instance = PluginInstance::register();

        let mut broken = settings();
        broken.remove("token");
        assert!(ConfigLoader::from_source(&broken).is_err());

        assert_eq!(
            instance.init_with(&broken, move |_| Ok(mock)),
            FlbStatus::Error
        );
        assert_eq!(instance.flush(&[event("alice", "a")], "t"), FlbStatus::Error);
        assert_eq!(handle.attempts(), 0);
    }
}
