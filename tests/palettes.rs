use hotbar_palettes::*;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

const HB: Namespace = Namespace::Hotbar;
const XB: Namespace = Namespace::Crossbar;

fn names(p: &Palettes<impl Persist>, ns: Namespace, job: JobId) -> Vec<String> {
    p.list(ns, job).iter().map(ToString::to_string).collect()
}

#[test]
fn a_fresh_job_gets_a_default_palette() {
    let mut p = Palettes::new(Settings::default(), NoPersist);
    let job = JobId::new(5);
    p.validate_for_job(HB, job).unwrap();
    assert_eq!(names(&p, HB, job), ["Default"]);
    assert_eq!(p.active(HB).unwrap(), "Default");
}

#[test]
fn palettes_never_run_out() {
    let mut p = Palettes::new(Settings::default(), NoPersist);
    let job = JobId::new(11);
    p.ensure_default(XB, job).unwrap();
    for name in ["A", "B", "C"] {
        p.create(XB, job, name).unwrap();
    }
    p.rename(XB, job, "Default", "D").unwrap();
    for name in ["A", "D", "B", "C"] {
        let _ = p.delete(XB, job, name);
        assert!(p.count(XB, job) >= 1);
    }
    assert_eq!(names(&p, XB, job), ["C"]);
    assert!(matches!(p.delete(XB, job, "C"), Err(PaletteError::LastPaletteProtected(_))));
}

#[test]
fn reordering_and_deleting_the_active_palette() {
    let mut p = Palettes::new(Settings::default(), NoPersist);
    let seen = Rc::new(RefCell::new(vec![]));
    let sink = seen.clone();
    p.subscribe(move |consumer, old, new| {
        sink.borrow_mut().push((consumer, old.map(str::to_owned), new.map(str::to_owned)));
        Ok(())
    });

    let job = JobId::new(3);
    p.create(HB, job, "Stuns").unwrap();
    p.create(HB, job, "Heals").unwrap();
    p.move_palette(HB, job, "Stuns", Direction::Forward).unwrap();
    assert_eq!(names(&p, HB, job), ["Heals", "Stuns"]);
    assert_eq!(p.active(HB), None);
    assert!(seen.borrow().is_empty());

    p.set_active(HB, Some("Heals"), Some(job));
    seen.borrow_mut().clear();
    p.delete(HB, job, "Heals").unwrap();
    assert_eq!(p.active(HB).unwrap(), "Stuns");
    assert_eq!(seen.borrow().len(), HOTBARS);
    assert!(seen
        .borrow()
        .iter()
        .all(|(_, old, new)| old.as_deref() == Some("Heals") && new.as_deref() == Some("Stuns")));
}

#[test]
fn settings_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("palettes.json");
    let job = JobId::new(19);

    {
        let mut p = Palettes::new(Settings::load(&path).unwrap(), JsonFile::new(&path));
        p.validate_for_job(XB, job).unwrap();
        p.create(XB, job, "Burst").unwrap();
        p.create(XB, job, "Aoe").unwrap();
        p.move_palette(XB, job, "Aoe", Direction::Back).unwrap();
        p.set_active(XB, Some("Burst"), Some(job));
        p.set_slot_data(XB, 0, job, SlotData(json!({"LeftHold": [1, 2, 3]}))).unwrap();
    }

    let mut p = Palettes::new(Settings::load(&path).unwrap(), JsonFile::new(&path));
    assert_eq!(names(&p, XB, job), ["Default", "Aoe", "Burst"]);
    assert_eq!(p.active(XB), None);
    p.validate_for_job(XB, job).unwrap();
    assert_eq!(p.active(XB).unwrap(), "Burst");
    assert_eq!(
        p.slot_data(XB, 0, job),
        Some(&SlotData(json!({"LeftHold": [1, 2, 3]})))
    );
    assert!(!dir.path().join("palettes.json.tmp").exists());
}

#[test]
fn hand_edited_settings_are_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("palettes.json");
    std::fs::write(
        &path,
        r#"{
            "hotbars": [
                { "7_1|hotbar:Legacy": [1], "what is this": {} },
                { "7|hotbar:Legacy": [2] },
                {}, {}, {}, {}
            ]
        }"#,
    )
    .unwrap();

    let mut p = Palettes::new(Settings::load(&path).unwrap(), NoPersist);
    let job = JobId::new(7);
    assert_eq!(names(&p, HB, job), ["Legacy"]);
    p.rename(HB, job, "Legacy", "Current").unwrap();
    let settings = p.settings().unwrap();
    let key = |n: &str| StorageKey::palette(job, HB, PaletteName::new(n, 32).unwrap());
    assert_eq!(settings.hotbars[0].get(&key("Current")), Some(&SlotData(json!([1]))));
    assert_eq!(settings.hotbars[1].get(&key("Current")), Some(&SlotData(json!([2]))));
    assert!(settings.hotbars.iter().all(|bar| bar.contains(&key("Current"))));
    assert_eq!(settings.hotbars[0].len(), 1);
}

#[test]
fn malformed_settings_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("palettes.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(Settings::load(&path), Err(PaletteError::Json(_))));
}

#[test]
fn shared_palettes_through_a_fallback_chain() {
    let mut p = Palettes::new(Settings::default(), NoPersist);
    let (class, job) = (JobId::new(6), JobId::new(24));
    p.create(HB, class, "Shared").unwrap();
    let (found, listed) = p.list_chain(HB, &[job, class]).unwrap();
    assert_eq!(found, class);
    assert_eq!(listed, ["Shared"]);

    p.copy(HB, PaletteRef::named(class, "Shared"), PaletteRef::named(job, "Own")).unwrap();
    let (found, _) = p.list_chain(HB, &[job, class]).unwrap();
    assert_eq!(found, job);
}

#[test]
fn empty_palette_keys_do_not_clobber_base_slots() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("palettes.json");
    std::fs::write(&path, r#"{ "crossbar": { "7": ["real base"], "7|crossbar:": ["junk"] } }"#).unwrap();

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.crossbar.len(), 1);
    assert_eq!(
        settings.crossbar.get(&StorageKey::base(JobId::new(7))),
        Some(&SlotData(json!(["real base"])))
    );
}
