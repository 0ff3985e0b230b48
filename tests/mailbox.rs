mod tests {
    use pev_light_orchestrator::{Busy, ControlRequest, Mailbox, RequestMailbox};

    #[test]
    fn test_first_post_wins() {
        let mailbox = Mailbox::new();
        assert_eq!(mailbox.try_post(1_u8), Ok(()));
        assert_eq!(mailbox.try_post(2), Err(Busy(2)));
        assert_eq!(mailbox.take(), Some(1));
        assert_eq!(mailbox.take(), None);
    }

    #[test]
    fn test_slot_frees_after_take() {
        let mailbox = Mailbox::new();
        let sender = mailbox.sender();
        let receiver = mailbox.receiver();
        assert!(!receiver.is_pending());

        sender.try_post("a").unwrap();
        assert!(receiver.is_pending());
        assert_eq!(receiver.take(), Some("a"));
        assert!(!receiver.is_pending());

        sender.try_post("b").unwrap();
        assert_eq!(receiver.take(), Some("b"));
    }

    #[test]
    fn test_requests_are_not_queued() {
        let mailbox = RequestMailbox::new();
        let sender = mailbox.sender();
        let other = sender;

        sender.try_post(ControlRequest::ManualBrake(true)).unwrap();
        assert_eq!(
            other.try_post(ControlRequest::TestStartup),
            Err(Busy(ControlRequest::TestStartup))
        );
        assert_eq!(
            mailbox.receiver().take(),
            Some(ControlRequest::ManualBrake(true))
        );
        assert_eq!(mailbox.receiver().take(), None);
    }

    #[test]
    fn test_busy_message() {
        assert_eq!(
            Busy(()).to_string(),
            "busy: a request is already pending"
        );
    }
}
