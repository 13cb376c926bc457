use oxide_recipe::{
    create_test_spawner, AppEvent, Effect, Emitter, FormEvent, ManualSpawner, MvuLogic,
    TestMvuRuntime, TestRenderer,
};

use super::support::{build_app_test, MockGateway};

#[derive(Debug, Clone, PartialEq)]
enum NoteEvent {
    Noted(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
struct NoteModel {
    notes: Vec<&'static str>,
}

struct NoteProps {
    notes: Vec<&'static str>,
}

/// Records every event it sees; `init` returns a caller-supplied effect.
struct NoteLogic {
    initial: spin::Mutex<Option<Effect<NoteEvent>>>,
}

impl NoteLogic {
    fn with_initial_effect(effect: Effect<NoteEvent>) -> Self {
        Self {
            initial: spin::Mutex::new(Some(effect)),
        }
    }
}

impl MvuLogic<NoteEvent, NoteModel, NoteProps> for NoteLogic {
    fn init(&self, model: NoteModel) -> (NoteModel, Effect<NoteEvent>) {
        let effect = self.initial.lock().take().unwrap_or_else(Effect::none);
        (model, effect)
    }

    fn update(&self, event: NoteEvent, model: &NoteModel) -> (NoteModel, Effect<NoteEvent>) {
        match event {
            NoteEvent::Noted(note) => {
                let mut notes = model.notes.clone();
                notes.push(note);
                (NoteModel { notes }, Effect::none())
            }
        }
    }

    fn view(&self, model: &NoteModel, _emitter: &Emitter<NoteEvent>) -> NoteProps {
        NoteProps {
            notes: model.notes.clone(),
        }
    }
}

#[test]
fn given_a_fresh_app_should_render_initial_props() {
    let test = build_app_test(MockGateway::new());

    assert_eq!(test.renders.count(), 1);
    test.renders.with_renders(|renders| {
        let form = &renders[0].form;
        assert_eq!(form.slots.len(), 1);
        assert_eq!(form.slots[0].value, "");
        assert_eq!(form.slots[0].placeholder, "Ingredient #1");
        assert!(form.on_add.is_some());
        assert!(!form.submit.enabled);
        assert_eq!(form.submit.text, "Create");
        assert!(renders[0].errors.is_none());
        assert!(renders[0].recipe.is_none());
        assert_eq!(renders[0].headline, "Let's create recipe!");
        assert_eq!(
            renders[0].tagline,
            "Provide a list of ingredients you have, any you don't want, \
             and optionally choose your preferred diet type."
        );
    });
}

#[test]
fn given_props_callback_invoked_when_events_processed_should_render_again() {
    let mut test = build_app_test(MockGateway::new());

    test.renders.with_renders(|renders| {
        (renders[0].form.on_add.as_ref().unwrap())();
    });
    assert_eq!(test.renders.count(), 1);

    test.driver.process_events();

    assert_eq!(test.renders.count(), 2);
    test.renders.with_renders(|renders| {
        assert_eq!(renders[1].form.slots.len(), 2);
        assert_eq!(renders[1].form.slots[1].placeholder, "Ingredient #2");
    });
}

#[test]
fn given_events_emitted_directly_should_wait_for_processing() {
    let mut test = build_app_test(MockGateway::new());

    test.driver.emitter().emit(AppEvent::Form(FormEvent::IngredientEdited {
        index: 0,
        text: "leek".to_string(),
    }));
    assert_eq!(test.model().form.ingredients.slots(), ["".to_string()]);

    test.driver.process_events();

    assert_eq!(test.model().form.ingredients.slots(), ["leek".to_string()]);
}

#[test]
fn given_a_batch_of_effects_as_initial_effect_should_queue_events_before_tasks() {
    let logic = NoteLogic::with_initial_effect(Effect::batch(vec![
        Effect::just(NoteEvent::Noted("first")),
        Effect::task(|emitter| async move {
            emitter.emit(NoteEvent::Noted("third"));
            emitter.emit(NoteEvent::Noted("fourth"));
        }),
        Effect::none(),
        Effect::just(NoteEvent::Noted("second")),
    ]));
    let renderer = TestRenderer::new();
    let runtime = TestMvuRuntime::new(
        NoteModel { notes: Vec::new() },
        logic,
        renderer.clone(),
        create_test_spawner(),
    );

    let mut driver = runtime.run();
    driver.process_events();

    assert_eq!(renderer.count(), 5);
    renderer.with_latest(|props| {
        assert_eq!(props.notes, vec!["first", "second", "third", "fourth"]);
    });
}

#[test]
fn given_a_held_spawner_should_still_queue_immediate_events() {
    let spawner = ManualSpawner::new();
    let renderer = TestRenderer::new();
    let runtime = TestMvuRuntime::new(
        NoteModel { notes: Vec::new() },
        NoteLogic::with_initial_effect(Effect::batch(vec![
            Effect::just(NoteEvent::Noted("now")),
            Effect::task(|emitter| async move { emitter.emit(NoteEvent::Noted("later")) }),
        ])),
        renderer.clone(),
        spawner.clone(),
    );

    let mut driver = runtime.run();
    driver.process_events();

    assert_eq!(driver.model().notes, vec!["now"]);
    assert_eq!(spawner.pending(), 1);

    assert_eq!(spawner.poll_pending(), 0);
    driver.process_events();

    assert_eq!(driver.model().notes, vec!["now", "later"]);
}

#[test]
fn given_no_initial_effect_should_spawn_nothing() {
    let spawner = ManualSpawner::new();
    let renderer = TestRenderer::new();
    let runtime = TestMvuRuntime::new(
        NoteModel { notes: Vec::new() },
        NoteLogic::with_initial_effect(Effect::none()),
        renderer.clone(),
        spawner.clone(),
    );

    let _driver = runtime.run();

    assert_eq!(spawner.pending(), 0);
    assert_eq!(renderer.count(), 1);
}

#[test]
fn given_a_held_task_should_emit_only_once_polled() {
    let spawner = ManualSpawner::new();
    let renderer = TestRenderer::new();
    let runtime = TestMvuRuntime::new(
        NoteModel { notes: Vec::new() },
        NoteLogic::with_initial_effect(Effect::task(|emitter| async move {
            emitter.emit(NoteEvent::Noted("late"))
        })),
        renderer.clone(),
        spawner.clone(),
    );

    let mut driver = runtime.run();
    driver.process_events();
    assert_eq!(renderer.count(), 1);
    assert_eq!(spawner.pending(), 1);

    assert_eq!(spawner.poll_pending(), 0);
    driver.process_events();

    assert_eq!(driver.model().notes, vec!["late"]);
}

#[test]
fn given_an_empty_batch_should_be_none() {
    let effect: Effect<NoteEvent> = Effect::batch(vec![Effect::none(), Effect::none()]);
    assert!(effect.is_none());
    assert!(!Effect::just(NoteEvent::Noted("x")).is_none());
}
