use pltr::events::{DialogInput, DialogRow};
use pltr::plot::file::file_name_for;
use pltr::plot::MapArea;
use pltr::systems::dialog::{DialogOutcome, DialogState, MAX_NAME_LENGTH, MISSING_SELECTION};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

fn save_dialog(name: &str) -> DialogState {
    DialogState::Save {
        name: name.to_string(),
        area: MapArea::FarbaneWoods,
    }
}

fn cycle(row: DialogRow, forward: bool) -> DialogInput {
    DialogInput::Cycle { row, forward }
}

mod save_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn typing_and_backspace_edit_the_name() {
        let official = common::official_plots();
        let mut dialog = save_dialog("");

        dialog.handle(DialogInput::Text("Keep".into()), &official);
        dialog.handle(DialogInput::Text("s!".into()), &official);
        dialog.handle(DialogInput::Backspace, &official);

        assert_eq!(dialog, save_dialog("Keeps"));
    }

    #[test]
    fn control_characters_are_dropped() {
        let official = common::official_plots();
        let mut dialog = save_dialog("");
        dialog.handle(DialogInput::Text("a\tb\nc".into()), &official);
        assert_eq!(dialog, save_dialog("abc"));
    }

    #[test]
    fn name_length_is_capped() {
        let official = common::official_plots();
        let mut dialog = save_dialog("");
        dialog.handle(DialogInput::Text("x".repeat(MAX_NAME_LENGTH + 10)), &official);

        let DialogState::Save { name, .. } = &dialog else {
            panic!("Expected the save dialog to stay open, got {dialog:?}");
        };
        assert_that(&name.chars().count()).is_equal_to(MAX_NAME_LENGTH);
    }

    #[test]
    fn second_row_cycles_the_map_area() {
        let official = common::official_plots();
        let mut dialog = save_dialog("Keep");

        dialog.handle(cycle(DialogRow::Second, true), &official);
        assert_eq!(
            dialog,
            DialogState::Save {
                name: "Keep".into(),
                area: MapArea::DunleyFarmlands
            }
        );

        dialog.handle(cycle(DialogRow::Second, false), &official);
        dialog.handle(cycle(DialogRow::Second, false), &official);
        assert_eq!(
            dialog,
            DialogState::Save {
                name: "Keep".into(),
                area: MapArea::SilverlightHills
            }
        );
    }

    #[test]
    fn confirm_returns_the_name_as_typed_and_closes() {
        let official = common::official_plots();
        let mut dialog = save_dialog("  Riverside Keep ");

        let outcome = dialog.handle(DialogInput::Confirm, &official);
        assert_eq!(
            outcome,
            DialogOutcome::Save {
                name: "  Riverside Keep ".into(),
                area: MapArea::FarbaneWoods
            }
        );
        assert_that(&dialog.is_open()).is_false();
        assert_that(&file_name_for("  Riverside Keep ")).is_equal_to("_Riverside_Keep_.json".to_string());
    }

    #[test]
    fn blank_name_raises_a_notice_that_returns_to_the_dialog() {
        let official = common::official_plots();
        let mut dialog = save_dialog("   ");

        let outcome = dialog.handle(DialogInput::Confirm, &official);
        assert_eq!(outcome, DialogOutcome::None);
        match &dialog {
            DialogState::Notice { message, previous } => {
                assert_that(message).is_equal_to("Please enter a plot name".to_string());
                assert_eq!(previous.as_deref(), Some(&save_dialog("   ")));
            }
            other => panic!("Expected a notice, got {other:?}"),
        }

        dialog.handle(DialogInput::Confirm, &official);
        assert_eq!(dialog, save_dialog("   "));
    }

    #[test]
    fn cancel_closes_without_outcome() {
        let official = common::official_plots();
        let mut dialog = save_dialog("Keep");
        assert_eq!(dialog.handle(DialogInput::Cancel, &official), DialogOutcome::None);
        assert_eq!(dialog, DialogState::Closed);
    }
}

mod clear_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn confirm_clears() {
        let official = common::official_plots();
        let mut dialog = DialogState::ClearConfirm;
        assert_eq!(dialog.handle(DialogInput::Confirm, &official), DialogOutcome::Clear);
        assert_eq!(dialog, DialogState::Closed);
    }

    #[test]
    fn text_is_ignored_and_cancel_closes() {
        let official = common::official_plots();
        let mut dialog = DialogState::ClearConfirm;
        assert_eq!(dialog.handle(DialogInput::Text("y".into()), &official), DialogOutcome::None);
        assert_eq!(dialog, DialogState::ClearConfirm);

        dialog.handle(DialogInput::Cancel, &official);
        assert_eq!(dialog, DialogState::Closed);
    }
}

mod official_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn switching_region_selects_its_first_plot() {
        let official = common::official_plots();
        let mut dialog = DialogState::LoadOfficial { region: 0, plot: 0 };

        dialog.handle(cycle(DialogRow::Second, true), &official);
        assert_eq!(dialog, DialogState::LoadOfficial { region: 0, plot: 1 });
        assert_that(&dialog.official_selection(&official)).is_equal_to(Some(("Farbane Woods", Some("South Plot"))));

        dialog.handle(cycle(DialogRow::First, true), &official);
        assert_eq!(dialog, DialogState::LoadOfficial { region: 1, plot: 0 });
    }

    #[test]
    fn selections_wrap_around() {
        let official = common::official_plots();
        let mut dialog = DialogState::LoadOfficial { region: 0, plot: 0 };

        dialog.handle(cycle(DialogRow::First, false), &official);
        assert_eq!(dialog, DialogState::LoadOfficial { region: 2, plot: 0 });

        dialog.handle(cycle(DialogRow::First, true), &official);
        dialog.handle(cycle(DialogRow::Second, false), &official);
        assert_eq!(dialog, DialogState::LoadOfficial { region: 0, plot: 1 });
    }

    #[test]
    fn confirm_returns_the_selected_names() {
        let official = common::official_plots();
        let mut dialog = DialogState::LoadOfficial { region: 1, plot: 0 };

        let outcome = dialog.handle(DialogInput::Confirm, &official);
        assert_eq!(
            outcome,
            DialogOutcome::LoadOfficial {
                region: "Dunley Farmlands".into(),
                plot: "Mill Plot".into()
            }
        );
        assert_eq!(dialog, DialogState::Closed);
    }

    #[test]
    fn region_without_plots_raises_a_notice() {
        let official = common::official_plots();
        let mut dialog = DialogState::LoadOfficial { region: 2, plot: 0 };

        assert_eq!(dialog.handle(DialogInput::Confirm, &official), DialogOutcome::None);
        match &dialog {
            DialogState::Notice { message, .. } => assert_that(message).is_equal_to(MISSING_SELECTION.to_string()),
            other => panic!("Expected a notice, got {other:?}"),
        }

        dialog.handle(DialogInput::Cancel, &official);
        assert_eq!(dialog, DialogState::LoadOfficial { region: 2, plot: 0 });
    }

    #[test]
    fn empty_index_raises_a_notice() {
        let official = pltr::plot::official::OfficialPlots::default();
        let mut dialog = DialogState::LoadOfficial { region: 0, plot: 0 };

        dialog.handle(cycle(DialogRow::First, true), &official);
        assert_eq!(dialog, DialogState::LoadOfficial { region: 0, plot: 0 });
        dialog.handle(DialogInput::Confirm, &official);
        assert!(matches!(dialog, DialogState::Notice { .. }));
    }
}

mod notice_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn standalone_notice_closes_on_confirm() {
        let official = common::official_plots();
        let mut dialog = DialogState::notice("Something went wrong");
        assert_that(&dialog.button_labels()).is_equal_to(("OK", None));

        dialog.handle(DialogInput::Text("x".into()), &official);
        assert!(matches!(dialog, DialogState::Notice { .. }));

        dialog.handle(DialogInput::Confirm, &official);
        assert_eq!(dialog, DialogState::Closed);
    }

    #[test]
    fn titles_and_rows_follow_the_dialog() {
        assert_that(&save_dialog("").title()).is_equal_to("Save Plot");
        assert_that(&DialogState::ClearConfirm.button_labels()).is_equal_to(("Yes, Clear All", Some("Cancel")));
        assert_eq!(save_dialog("").cycle_rows(), &[DialogRow::Second]);
        assert_eq!(
            DialogState::LoadOfficial { region: 0, plot: 0 }.cycle_rows(),
            &[DialogRow::First, DialogRow::Second]
        );
        assert_that(&DialogState::Closed.is_open()).is_false();
    }
}
