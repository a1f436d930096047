use std::time::Duration;

use engine::{
    Amount, Direction, Effect, Event, Machine, NoticeLevel, PayeeRecord, Rejection, ScanFailure,
    Screen, TransactionLog, fixtures, spawn_settlement,
};
use tokio::sync::mpsc;
use uuid::Uuid;

fn machine() -> Machine {
    Machine::builder()
        .settlement_delay(Duration::from_millis(1500))
        .build()
}

fn local_store() -> PayeeRecord {
    PayeeRecord::new("Local Store", "localstore@okaxis")
}

fn scheduled_reference(effects: &[Effect]) -> String {
    match effects {
        [Effect::ScheduleSettlement { reference, .. }] => reference.clone(),
        other => panic!("expected a single ScheduleSettlement, got {other:?}"),
    }
}

/// Runs a full quick-pay from Home and returns to Home.
fn pay(machine: &mut Machine, payee: PayeeRecord, amount: &str) -> String {
    machine.dispatch(Event::ChooseQuickPay(payee));
    machine.dispatch(Event::SetAmount(amount.to_string()));
    let reference = scheduled_reference(&machine.dispatch(Event::SubmitPayment));
    machine.dispatch(Event::SettlementComplete {
        reference: reference.clone(),
    });
    assert_eq!(machine.state().screen, Screen::Success);
    machine.dispatch(Event::Done);
    reference
}

fn error_notice(effect: &Effect) -> bool {
    matches!(effect, Effect::Notify(notice) if notice.level == NoticeLevel::Error)
}

#[test]
fn starts_on_home_with_seeded_history() {
    let machine = machine();
    let state = machine.state();
    assert_eq!(state.visible_screen(), Screen::Home);
    assert_eq!(state.transactions.len(), fixtures::seed_history().len());
    assert_eq!(state.merchants.len(), fixtures::DEMO_MERCHANTS.len());
    assert!(!state.processing());
    assert!(state.draft.is_none());
}

#[test]
fn quick_pay_goes_straight_to_amount_entry() {
    let mut machine = machine();
    let effects = machine.dispatch(Event::ChooseQuickPay(local_store()));

    assert!(effects.is_empty());
    let state = machine.state();
    assert_eq!(state.screen, Screen::EnterAmount);
    assert_eq!(
        state.payee.as_ref().map(|p| p.upi_handle.as_str()),
        Some("localstore@okaxis")
    );
    let draft = state.draft.as_ref().unwrap();
    assert_eq!(draft.payee, local_store());
    assert!(draft.amount_input.is_empty());
}

#[test]
fn camera_scan_accepts_payment_uri_and_releases_camera() {
    let mut machine = machine();
    machine.dispatch(Event::ChooseScan);
    assert_eq!(machine.state().screen, Screen::Scan);

    assert_eq!(machine.dispatch(Event::StartCamera), vec![Effect::StartCapture]);
    assert!(machine.state().camera_active);
    assert!(machine.dispatch(Event::StartCamera).is_empty());

    let effects = machine.dispatch(Event::ScanSucceeded(
        "upi://pay?pa=cafe@ybl&pn=Cafe%20Rio".to_string(),
    ));
    assert_eq!(effects, vec![Effect::StopCapture]);
    let state = machine.state();
    assert!(!state.camera_active);
    assert_eq!(state.screen, Screen::EnterAmount);
    assert_eq!(state.payee, Some(PayeeRecord::new("Cafe Rio", "cafe@ybl")));
}

#[test]
fn uploaded_image_scan_needs_no_camera_release() {
    let mut machine = machine();
    machine.dispatch(Event::ChooseScan);
    assert_eq!(
        machine.dispatch(Event::RequestImageUpload),
        vec![Effect::PromptImageUpload]
    );

    let effects = machine.dispatch(Event::ScanSucceeded("upi://pay?pa=a@b".to_string()));
    assert!(effects.is_empty());
    assert_eq!(machine.state().screen, Screen::EnterAmount);
    assert_eq!(
        machine.state().payee.as_ref().map(|p| p.name.as_str()),
        Some("Unknown Merchant")
    );
}

#[test]
fn rejected_payload_keeps_scanning() {
    let mut machine = machine();
    machine.dispatch(Event::ChooseScan);
    machine.dispatch(Event::StartCamera);

    for raw in ["http://example.com", "upi://pay?pn=Shop", "not a uri at all"] {
        let effects = machine.dispatch(Event::ScanSucceeded(raw.to_string()));
        assert_eq!(effects.len(), 1, "{raw}");
        assert!(error_notice(&effects[0]));
        assert_eq!(machine.state().screen, Screen::Scan);
        assert!(machine.state().camera_active);
        assert!(machine.state().payee.is_none());
    }
}

#[test]
fn whitespace_padded_payload_is_rejected() {
    let mut machine = machine();
    machine.dispatch(Event::ChooseScan);

    for raw in ["\tupi://pay?pa=evil@x", "  upi://pay?pa=a@b&pn=Shop", "upi://pay?pa=a@b\n"] {
        let effects = machine.dispatch(Event::ScanSucceeded(raw.to_string()));
        assert_eq!(effects.len(), 1, "{raw:?}");
        assert!(error_notice(&effects[0]));
        assert_eq!(machine.state().screen, Screen::Scan);
        assert!(machine.state().payee.is_none());
        assert!(machine.state().draft.is_none());
    }
}

#[test]
fn camera_unavailable_prompts_image_upload() {
    let mut machine = machine();
    machine.dispatch(Event::ChooseScan);
    machine.dispatch(Event::StartCamera);

    let effects = machine.dispatch(Event::ScanFailed(ScanFailure::CaptureUnavailable(
        "no device".to_string(),
    )));
    assert_eq!(effects.len(), 2);
    assert!(error_notice(&effects[0]));
    assert_eq!(effects[1], Effect::PromptImageUpload);
    assert!(!machine.state().camera_active);
    assert_eq!(machine.state().screen, Screen::Scan);

    // Retrying the camera is allowed after a failure.
    assert_eq!(machine.dispatch(Event::StartCamera), vec![Effect::StartCapture]);
}

#[test]
fn decode_and_payload_failures_only_notify() {
    let mut machine = machine();
    machine.dispatch(Event::ChooseScan);

    for failure in [
        ScanFailure::DecodeFailure("blank image".to_string()),
        ScanFailure::MalformedPayload(Rejection::NotPaymentUri),
    ] {
        let effects = machine.dispatch(Event::ScanFailed(failure));
        assert_eq!(effects.len(), 1);
        assert!(error_notice(&effects[0]));
        assert_eq!(machine.state().screen, Screen::Scan);
    }
}

#[test]
fn leaving_scan_releases_an_active_camera() {
    let mut machine = machine();
    machine.dispatch(Event::ChooseScan);
    machine.dispatch(Event::StartCamera);
    assert_eq!(machine.dispatch(Event::Back), vec![Effect::StopCapture]);
    assert_eq!(machine.state().screen, Screen::Home);
    assert!(!machine.state().camera_active);

    machine.dispatch(Event::ChooseScan);
    assert!(machine.dispatch(Event::Back).is_empty());
}

#[test]
fn late_capture_events_outside_scan_are_ignored() {
    let mut machine = machine();
    let effects = machine.dispatch(Event::ScanSucceeded("upi://pay?pa=a@b".to_string()));
    assert!(effects.is_empty());
    assert_eq!(machine.state().screen, Screen::Home);
    assert!(machine.state().payee.is_none());
}

#[test]
fn payment_settles_into_a_sent_record() {
    let mut machine = machine();
    let before = machine.state().transactions.len();

    machine.dispatch(Event::ChooseQuickPay(local_store()));
    machine.dispatch(Event::SetAmount("250.50".to_string()));
    assert!(machine.state().draft.as_ref().unwrap().is_submittable());

    let effects = machine.dispatch(Event::SubmitPayment);
    assert!(matches!(
        effects.as_slice(),
        [Effect::ScheduleSettlement { delay, .. }] if *delay == Duration::from_millis(1500)
    ));
    let reference = scheduled_reference(&effects);
    assert!(reference.starts_with("TXN"));
    assert_eq!(reference.len(), 13);
    assert!(machine.state().processing());
    assert_eq!(machine.state().screen, Screen::EnterAmount);

    machine.dispatch(Event::SettlementComplete {
        reference: reference.clone(),
    });

    let state = machine.state();
    assert_eq!(state.screen, Screen::Success);
    assert!(!state.processing());
    assert!(state.draft.is_none());
    assert_eq!(state.transactions.len(), before + 1);

    let record = state.transactions.latest().unwrap();
    assert_eq!(record.amount, Amount::new(25_050));
    assert_eq!(record.direction, Direction::Sent);
    assert_eq!(record.counterparty_upi, "localstore@okaxis");
    assert_eq!(record.transaction_ref.as_deref(), Some(reference.as_str()));
    let sender = record.sender.as_ref().unwrap();
    assert_eq!(sender.upi_handle, fixtures::DEFAULT_SENDER_UPI);
    assert_eq!(sender.bank, fixtures::DEFAULT_BANK);
    assert_eq!(state.last_transaction().map(|r| r.id), Some(record.id));
}

#[test]
fn double_submit_produces_one_record() {
    let mut machine = machine();
    let before = machine.state().transactions.len();

    machine.dispatch(Event::ChooseQuickPay(local_store()));
    machine.dispatch(Event::SetAmount("100".to_string()));
    let reference = scheduled_reference(&machine.dispatch(Event::SubmitPayment));
    assert!(machine.dispatch(Event::SubmitPayment).is_empty());

    machine.dispatch(Event::SettlementComplete {
        reference: reference.clone(),
    });
    machine.dispatch(Event::SettlementComplete { reference });

    assert_eq!(machine.state().transactions.len(), before + 1);
}

#[test]
fn non_positive_or_invalid_amounts_are_not_submitted() {
    let mut machine = machine();
    machine.dispatch(Event::ChooseQuickPay(local_store()));

    for input in ["", "0", "0.00", "-5", "abc", "1.234"] {
        machine.dispatch(Event::SetAmount(input.to_string()));
        assert_eq!(
            machine.state().draft.as_ref().map(|d| d.amount_input.as_str()),
            Some(input)
        );
        assert!(machine.dispatch(Event::SubmitPayment).is_empty(), "{input}");
        assert!(!machine.state().processing());
    }
}

#[test]
fn draft_is_frozen_while_processing() {
    let mut machine = machine();
    machine.dispatch(Event::ChooseQuickPay(local_store()));
    machine.dispatch(Event::SetAmount("300".to_string()));
    let reference = scheduled_reference(&machine.dispatch(Event::SubmitPayment));

    machine.dispatch(Event::SetAmount("999".to_string()));
    assert!(machine.dispatch(Event::Back).is_empty());
    assert_eq!(machine.state().screen, Screen::EnterAmount);
    assert_eq!(
        machine.state().draft.as_ref().map(|d| d.amount_input.as_str()),
        Some("300")
    );

    machine.dispatch(Event::SettlementComplete { reference });
    assert_eq!(
        machine.state().transactions.latest().map(|r| r.amount),
        Some(Amount::from_major(300))
    );
}

#[test]
fn stale_settlement_is_ignored() {
    let mut machine = machine();
    machine.dispatch(Event::ChooseQuickPay(local_store()));
    machine.dispatch(Event::SetAmount("10".to_string()));
    machine.dispatch(Event::SubmitPayment);

    let before = machine.state().transactions.len();
    machine.dispatch(Event::SettlementComplete {
        reference: "TXN0000000000".to_string(),
    });
    assert!(machine.state().processing());
    assert_eq!(machine.state().transactions.len(), before);
}

#[test]
fn back_from_amount_entry_discards_draft() {
    let mut machine = machine();
    machine.dispatch(Event::ChooseQuickPay(local_store()));
    machine.dispatch(Event::SetAmount("42".to_string()));
    machine.dispatch(Event::Back);

    let state = machine.state();
    assert_eq!(state.screen, Screen::Home);
    assert!(state.draft.is_none());
    assert!(state.payee.is_none());
}

#[test]
fn history_is_capped_most_recent_first() {
    let mut machine = machine();
    let seeded: Vec<Uuid> = machine.state().transactions.iter().map(|r| r.id).collect();

    let mut references = Vec::new();
    for i in 1..=12 {
        references.push(pay(&mut machine, local_store(), &i.to_string()));
        let expected = (seeded.len() + i).min(TransactionLog::CAPACITY);
        assert_eq!(machine.state().transactions.len(), expected);
        assert_eq!(
            machine.state().transactions.latest().map(|r| r.amount),
            Some(Amount::from_major(i as i64))
        );
    }

    let state = machine.state();
    assert!(seeded.iter().all(|id| !state.transactions.contains(*id)));
    let amounts: Vec<i64> = state
        .transactions
        .iter()
        .map(|r| r.amount.minor() / 100)
        .collect();
    assert_eq!(amounts, vec![12, 11, 10, 9, 8, 7, 6, 5, 4, 3]);

    let mut unique = references.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), references.len());
}

#[test]
fn detail_overlay_returns_to_home() {
    let mut machine = machine();
    let id = machine.state().transactions.iter().nth(1).unwrap().id;

    machine.dispatch(Event::SelectTransaction(id));
    assert_eq!(machine.state().visible_screen(), Screen::TransactionDetail);
    assert_eq!(machine.state().selected_transaction().map(|r| r.id), Some(id));

    // Other navigation is inert while the overlay is open.
    machine.dispatch(Event::ChooseScan);
    assert_eq!(machine.state().visible_screen(), Screen::TransactionDetail);

    machine.dispatch(Event::Back);
    assert_eq!(machine.state().visible_screen(), Screen::Home);
    assert!(machine.state().selected.is_none());
}

#[test]
fn detail_overlay_returns_to_success() {
    let mut machine = machine();
    machine.dispatch(Event::ChooseQuickPay(local_store()));
    machine.dispatch(Event::SetAmount("75".to_string()));
    let reference = scheduled_reference(&machine.dispatch(Event::SubmitPayment));
    machine.dispatch(Event::SettlementComplete { reference });

    let id = machine.state().last_transaction().unwrap().id;
    machine.dispatch(Event::SelectTransaction(id));
    assert_eq!(machine.state().visible_screen(), Screen::TransactionDetail);

    machine.dispatch(Event::Done);
    assert_eq!(machine.state().visible_screen(), Screen::Success);

    machine.dispatch(Event::Done);
    let state = machine.state();
    assert_eq!(state.visible_screen(), Screen::Home);
    assert!(state.payee.is_none());
    assert!(state.last_transaction_ref.is_none());
}

#[test]
fn selecting_unknown_transaction_is_a_no_op() {
    let mut machine = machine();
    machine.dispatch(Event::SelectTransaction(Uuid::new_v4()));
    assert_eq!(machine.state().visible_screen(), Screen::Home);
}

#[test]
fn my_qr_round_trip() {
    let mut machine = machine();
    machine.dispatch(Event::ChooseShowMyQr);
    assert_eq!(machine.state().screen, Screen::ShowMyQr);
    machine.dispatch(Event::Back);
    assert_eq!(machine.state().screen, Screen::Home);
}

#[tokio::test(start_paused = true)]
async fn settlement_timer_drives_the_machine() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut machine = machine();

    machine.dispatch(Event::ChooseQuickPay(local_store()));
    machine.dispatch(Event::SetAmount("500".to_string()));

    let mut tasks = Vec::new();
    for _ in 0..2 {
        for effect in machine.dispatch(Event::SubmitPayment) {
            if let Effect::ScheduleSettlement { reference, delay } = effect {
                tasks.push(spawn_settlement(reference, delay, tx.clone()));
            }
        }
    }
    drop(tx);
    assert_eq!(tasks.len(), 1);

    while let Some(event) = rx.recv().await {
        machine.dispatch(event);
    }

    let state = machine.state();
    assert_eq!(state.screen, Screen::Success);
    assert_eq!(
        state.last_transaction().map(|r| r.amount),
        Some(Amount::from_major(500))
    );
}
