use mesto_dom::{config::DialogConfig, dialog::DialogManager};
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

wasm_bindgen_test_configure!(run_in_browser);

use web_fixture_::{click, document, mouse_down, press_key, Fixture};

const DIALOGS: &str = r#"
	<div class="popup popup_type_edit">
		<div class="popup__content">
			<button class="popup__close" type="button"></button>
			<p class="popup__text">Edit profile</p>
		</div>
	</div>
	<div class="popup popup_type_new-card">
		<div class="popup__content">
			<button class="popup__close" type="button"></button>
		</div>
	</div>
	<div class="popup popup_type_bare">
		<div class="popup__content"></div>
	</div>
"#;

const OPENED: &str = "popup_is-opened";

fn setup() -> (Fixture, DialogManager) {
	let fixture = Fixture::new(DIALOGS);
	let dialogs = DialogManager::new(document(), DialogConfig::default());
	assert_eq!(dialogs.attach_all().unwrap(), 3);
	(fixture, dialogs)
}

#[wasm_bindgen_test]
fn escape_closes_the_open_dialog() {
	let (fixture, dialogs) = setup();
	let edit = fixture.get(".popup_type_edit");

	dialogs.open(&edit);
	assert!(edit.class_list().contains(OPENED));
	assert_eq!(dialogs.current(), Some(edit.clone()));

	press_key("Escape");
	assert!(!edit.class_list().contains(OPENED));
	assert_eq!(dialogs.current(), None);
	assert_eq!(dialogs.open_count(), 0);
}

#[wasm_bindgen_test]
fn escape_closes_only_the_topmost_dialog() {
	let (fixture, dialogs) = setup();
	let edit = fixture.get(".popup_type_edit");
	let new_card = fixture.get(".popup_type_new-card");

	dialogs.open(&edit);
	dialogs.open(&new_card);

	press_key("Escape");
	assert!(!new_card.class_list().contains(OPENED));
	assert!(edit.class_list().contains(OPENED));
	assert_eq!(dialogs.current(), Some(edit.clone()));

	press_key("Escape");
	assert!(!edit.class_list().contains(OPENED));
	assert_eq!(dialogs.open_count(), 0);
}

#[wasm_bindgen_test]
fn closing_another_dialog_keeps_the_current_one() {
	let (fixture, dialogs) = setup();
	let edit = fixture.get(".popup_type_edit");
	let new_card = fixture.get(".popup_type_new-card");

	dialogs.open(&edit);
	dialogs.open(&new_card);
	dialogs.close(&edit);
	assert_eq!(dialogs.current(), Some(new_card.clone()));
	assert!(!dialogs.is_open(&edit));

	press_key("Escape");
	assert!(!new_card.class_list().contains(OPENED));
	assert_eq!(dialogs.current(), None);
}

#[wasm_bindgen_test]
fn closing_a_closed_dialog_changes_nothing() {
	let (fixture, dialogs) = setup();
	let edit = fixture.get(".popup_type_edit");
	let bare = fixture.get(".popup_type_bare");

	dialogs.open(&edit);
	dialogs.close(&bare);
	assert_eq!(dialogs.current(), Some(edit.clone()));
	assert!(edit.class_list().contains(OPENED));
}

#[wasm_bindgen_test]
fn reopening_does_not_stack_twice() {
	let (fixture, dialogs) = setup();
	let edit = fixture.get(".popup_type_edit");

	dialogs.open(&edit);
	dialogs.open(&edit);
	assert_eq!(dialogs.open_count(), 1);

	press_key("Escape");
	assert!(!edit.class_list().contains(OPENED));
	press_key("Escape");
	assert_eq!(dialogs.open_count(), 0);
}

#[wasm_bindgen_test]
fn other_keys_are_ignored() {
	let (fixture, dialogs) = setup();
	let edit = fixture.get(".popup_type_edit");

	dialogs.open(&edit);
	press_key("Enter");
	assert!(edit.class_list().contains(OPENED));
	dialogs.close(&edit);
}

#[wasm_bindgen_test]
fn backdrop_press_closes() {
	let (fixture, dialogs) = setup();
	let edit = fixture.get(".popup_type_edit");

	dialogs.open(&edit);
	mouse_down(&fixture.get(".popup_type_edit .popup__text"));
	assert!(edit.class_list().contains(OPENED));

	mouse_down(&edit);
	assert!(!edit.class_list().contains(OPENED));
	assert_eq!(dialogs.current(), None);
}

#[wasm_bindgen_test]
fn close_button_closes() {
	let (fixture, dialogs) = setup();
	let new_card = fixture.get(".popup_type_new-card");

	dialogs.open(&new_card);
	click(&fixture.get(".popup_type_new-card .popup__close"));
	assert!(!new_card.class_list().contains(OPENED));
}

#[wasm_bindgen_test]
fn dialog_without_close_control_still_dismisses() {
	let (fixture, dialogs) = setup();
	let bare = fixture.get(".popup_type_bare");

	dialogs.open(&bare);
	press_key("Escape");
	assert!(!bare.class_list().contains(OPENED));
}

#[wasm_bindgen_test]
fn custom_dismiss_key() {
	let fixture = Fixture::new(DIALOGS);
	let dialogs = DialogManager::new(
		document(),
		DialogConfig {
			dismiss_key: "q".to_owned(),
			..DialogConfig::default()
		},
	);
	let edit = fixture.get(".popup_type_edit");

	dialogs.open(&edit);
	press_key("Escape");
	assert!(edit.class_list().contains(OPENED));
	press_key("q");
	assert!(!edit.class_list().contains(OPENED));
}

#[wasm_bindgen_test]
fn dropped_manager_stops_listening() {
	let fixture = Fixture::new(DIALOGS);
	let edit = fixture.get(".popup_type_edit");
	{
		let dialogs = DialogManager::new(document(), DialogConfig::default());
		dialogs.open(&edit);
	}

	// Must not call into the dropped handler.
	press_key("Escape");
	assert!(edit.class_list().contains(OPENED));
}

#[wasm_bindgen_test]
fn dropped_manager_removes_attached_listeners() {
	let (fixture, dialogs) = setup();
	let edit = fixture.get(".popup_type_edit");
	dialogs.open(&edit);
	drop(dialogs);

	mouse_down(&edit);
	assert!(edit.class_list().contains(OPENED));
	click(&fixture.get(".popup_type_edit .popup__close"));
	assert!(edit.class_list().contains(OPENED));
}

#[wasm_bindgen_test]
fn leaked_manager_keeps_listening() {
	let fixture = Fixture::new(DIALOGS);
	let new_card = fixture.get(".popup_type_new-card");
	{
		let dialogs = DialogManager::new(document(), DialogConfig::default()).leak();
		dialogs.attach(&new_card).unwrap();
		dialogs.open(&new_card);
	}

	mouse_down(&new_card);
	assert!(!new_card.class_list().contains(OPENED));
}
