use character_core::{
    AttributeValue, ChangeMode, DerivedKind, Effect, EngineError, OverrideOp, Player, PlayerId,
    ResourceKind, Stat, StatOverride,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use runtime::repository::{CharacterRepository, InMemoryCharacterRepo, InMemoryPlayerRepo, PlayerRepository};
use runtime::{GameService, RegenTarget, RuntimeError};

fn service() -> GameService<InMemoryPlayerRepo, InMemoryCharacterRepo> {
    GameService::new(InMemoryPlayerRepo::new(), InMemoryCharacterRepo::new())
}

const ALICE: PlayerId = PlayerId(1);
const BOB: PlayerId = PlayerId(2);

#[test]
fn create_selects_and_current_resolves() {
    let service = service();

    let created = service.create_character(ALICE, "Pot").unwrap();
    let (player, current) = service.current_character(ALICE).unwrap();

    assert_eq!(player.current_character, Some(created.id));
    assert_eq!(current.id, created.id);
    assert_eq!(current.name, "Pot");
}

#[test]
fn players_without_characters_are_told_so() {
    let service = service();
    assert!(matches!(
        service.current_character(ALICE).unwrap_err(),
        RuntimeError::NoCharacters(ALICE)
    ));
}

#[test]
fn deselected_player_is_told_to_select() {
    let service = service();
    service.create_character(ALICE, "Pot").unwrap();

    let mut player = service.players().find(ALICE).unwrap().unwrap();
    player.deselect();
    service.players().save(&player).unwrap();

    assert!(matches!(
        service.current_character(ALICE).unwrap_err(),
        RuntimeError::NoCharacterSelected(ALICE)
    ));
}

#[test]
fn stale_selection_is_cleared_and_reported() {
    let service = service();
    let pot = service.create_character(ALICE, "Pot").unwrap();
    service.create_character(ALICE, "Backup").unwrap();
    service.select_character(ALICE, pot.id).unwrap();

    service.characters().delete(pot.id).unwrap();

    assert!(matches!(
        service.current_character(ALICE).unwrap_err(),
        RuntimeError::CharacterNotFound(id) if id == pot.id
    ));
    // The dangling selection was persisted away.
    let player = service.players().find(ALICE).unwrap().unwrap();
    assert_eq!(player.current_character, None);
}

#[test]
fn name_length_is_validated_at_the_boundary() {
    let service = service();
    let err = service
        .create_character(ALICE, "An Unreasonably Long Name For A Character")
        .unwrap_err();
    assert!(matches!(err, RuntimeError::NameTooLong));
}

#[test]
fn only_owners_or_gms_may_select() {
    let service = service();
    let pot = service.create_character(ALICE, "Pot").unwrap();

    service.create_character(BOB, "Rival").unwrap();
    assert!(matches!(
        service.select_character(BOB, pot.id).unwrap_err(),
        RuntimeError::NotPermitted(id) if id == pot.id
    ));

    let gm = PlayerId(99);
    service.players().save(&Player::gm(gm)).unwrap();
    let selected = service.select_character(gm, pot.id).unwrap();
    assert_eq!(selected.id, pot.id);
}

#[test]
fn gm_listing_sees_everything() {
    let service = service();
    service.create_character(ALICE, "Pot").unwrap();
    service.create_character(BOB, "Rival").unwrap();

    let gm = PlayerId(99);
    service.players().save(&Player::gm(gm)).unwrap();

    assert_eq!(service.characters_for(ALICE).unwrap().len(), 1);
    assert_eq!(service.characters_for(gm).unwrap().len(), 2);
}

#[test]
fn point_buy_round_trips_through_storage() {
    let service = service();
    let pot = service.create_character(ALICE, "Pot").unwrap();

    let outcome = service
        .point_buy(ALICE, Stat::Strength, ChangeMode::Add, 5)
        .unwrap();
    assert_eq!(outcome.points_spent, 5);
    assert_eq!(outcome.free_points, 10);
    assert!(outcome.diff.get(DerivedKind::CarryWeight).is_some());

    // The mutation was persisted, not just computed.
    let stored = service.characters().load(pot.id).unwrap().unwrap();
    assert_eq!(stored.get_stat(Stat::Strength), 15);
    assert_eq!(stored.free_points, 10);
}

#[test]
fn engine_rejections_pass_through_unchanged() {
    let service = service();
    service.create_character(ALICE, "Pot").unwrap();

    let err = service
        .point_buy(ALICE, Stat::Strength, ChangeMode::Add, 100)
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Engine(EngineError::InsufficientFreePoints { missing: 85 })
    ));
}

#[test]
fn regen_rejects_conflicting_arguments() {
    let service = service();
    service.create_character(ALICE, "Pot").unwrap();

    assert!(matches!(
        service
            .regen(ALICE, RegenTarget::All, Some(3), true)
            .unwrap_err(),
        RuntimeError::ConflictingRegenArguments
    ));
}

#[test]
fn regen_all_reports_per_pool() {
    let service = service();
    let pot = service.create_character(ALICE, "Pot").unwrap();

    // At the starting sheet hp has no rate yet while mana regenerates 1/round.
    let outcomes = service.regen(ALICE, RegenTarget::All, None, false).unwrap();
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].regained(), 0);
    assert_eq!(outcomes[1].regained(), 1);

    let stored = service.characters().load(pot.id).unwrap().unwrap();
    assert_eq!(stored.resources().mp, 1);

    let outcomes = service.regen(ALICE, RegenTarget::Mana, None, true).unwrap();
    assert_eq!(outcomes[0].after, 10);
}

#[test]
fn adjust_resource_persists_the_clamped_value() {
    let service = service();
    let pot = service.create_character(ALICE, "Pot").unwrap();

    let change = service
        .adjust_resource(ALICE, ResourceKind::Weight, ChangeMode::Add, 100)
        .unwrap();
    assert_eq!(change.after, 30);

    let stored = service.characters().load(pot.id).unwrap().unwrap();
    assert_eq!(stored.resources().weight, 30);
}

#[test]
fn effects_diff_tick_and_expire_through_the_service() {
    let service = service();
    let pot = service.create_character(ALICE, "Pot").unwrap();

    let (id, diff) = service
        .apply_effect(
            ALICE,
            Effect::new(
                "haste",
                vec![StatOverride::expiring(
                    Stat::Agility,
                    OverrideOp::Add,
                    10.0,
                    2,
                )],
            ),
        )
        .unwrap();

    let diff = diff.expect("both snapshots resolve");
    assert_eq!(
        diff.get(DerivedKind::WalkSpeed).map(|d| d.after),
        Some(AttributeValue::Int(20))
    );

    service.expire_tick(ALICE, 2).unwrap();
    let stored = service.characters().load(pot.id).unwrap().unwrap();
    assert!(stored.effects().is_empty());
    assert!(!service.remove_effect(ALICE, id).unwrap());
}

#[test]
fn broken_effects_still_attach_but_skip_the_diff() {
    let service = service();
    service.create_character(ALICE, "Pot").unwrap();

    let (id, diff) = service
        .apply_effect(
            ALICE,
            Effect::new(
                "cursed",
                vec![StatOverride::permanent(
                    Stat::Strength,
                    OverrideOp::Divide,
                    0.0,
                )],
            ),
        )
        .unwrap();
    assert!(diff.is_none());

    // The query surface now reports the domain failure...
    let (_, character) = service.current_character(ALICE).unwrap();
    assert!(matches!(
        character.attribute("strength").unwrap_err(),
        EngineError::DivisionByZero { .. }
    ));

    // ...and removing the effect recovers.
    assert!(service.remove_effect(ALICE, id).unwrap());
    let (_, character) = service.current_character(ALICE).unwrap();
    assert_eq!(
        character.attribute("strength").unwrap(),
        AttributeValue::Int(10)
    );
}

#[test]
fn rolls_use_the_resolved_stat() {
    let service = service();
    service.create_character(ALICE, "Pot").unwrap();
    service
        .apply_effect(
            ALICE,
            Effect::new(
                "focus",
                vec![StatOverride::permanent(
                    Stat::Perception,
                    OverrideOp::Add,
                    30.0,
                )],
            ),
        )
        .unwrap();

    let mut rng = StdRng::seed_from_u64(5);
    let outcome = service
        .roll_stat(ALICE, Stat::Perception, 5, &mut rng)
        .unwrap();

    assert_eq!(outcome.stat_value, 40);
    assert_eq!(outcome.difficulty, 45);
    assert_eq!(outcome.success, outcome.roll <= 45);

    // Same seed, same outcome.
    let mut rng = StdRng::seed_from_u64(5);
    let again = service
        .roll_stat(ALICE, Stat::Perception, 5, &mut rng)
        .unwrap();
    assert_eq!(again, outcome);
}
