//! Behavioural coverage for the in-memory store.

use chrono::NaiveDate;
use pagination::{PageLimits, PageRequest};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    AllergenRepository, AllergenRepositoryError, CategoryRepository, InventoryRepository,
    LocationRepository, LocationRepositoryError,
};
use crate::domain::{
    AllergenName, HouseholdDraft, ItemDraft, ItemName, ItemQuery, ItemSortField, LocationDraft,
    Quantity, SortOrder,
};

struct Seeded {
    store: InMemoryStore,
    household: Household,
    owner: UserId,
}

fn user(email: &str) -> User {
    User::new(
        UserId::random(),
        Email::new(email).expect("email"),
        crate::domain::DisplayName::new("Someone").expect("display name"),
    )
}

#[fixture]
async fn seeded() -> Seeded {
    let store = InMemoryStore::new();
    let owner = user("owner@example.com");
    store.insert_user(owner.clone());
    let household = Household::create(HouseholdDraft::new("Home", None).expect("draft"));
    let founder = Membership::join(household.id, owner.id().clone(), HouseholdRole::Admin);
    HouseholdRepository::create(&store, &household, &founder)
        .await
        .expect("create household");
    Seeded {
        store,
        household,
        owner: owner.id().clone(),
    }
}

fn item(seeded: &Seeded, name: &str, expires: Option<NaiveDate>) -> InventoryItem {
    let mut draft = ItemDraft::new(
        ItemName::new(name).expect("name"),
        Quantity::from_hundredths(100).expect("quantity"),
    );
    draft.expiration_date = expires;
    InventoryItem::create(seeded.household.id, seeded.owner.clone(), draft)
}

#[rstest]
#[tokio::test]
async fn new_store_seeds_categories_and_development_account() {
    let store = InMemoryStore::new();
    let categories = CategoryRepository::list(&store).await.expect("categories");
    assert_eq!(categories.len(), default_categories().len());
    let dev = UserId::new(DEVELOPMENT_USER_ID).expect("dev id");
    let found = UserRepository::find(&store, &dev).await.expect("find");
    assert_eq!(
        found.map(|user| user.email().as_ref().to_owned()),
        Some(DEVELOPMENT_USER_EMAIL.to_owned())
    );
}

#[rstest]
#[tokio::test]
async fn listing_reports_role_and_member_count(#[future] seeded: Seeded) {
    let seeded = seeded.await;
    let listings = seeded
        .store
        .list_for_user(&seeded.owner)
        .await
        .expect("listings");
    assert_eq!(listings.len(), 1);
    let listing = listings.first().expect("one listing");
    assert_eq!(listing.role, StoredRole::new("admin"));
    assert_eq!(listing.member_count, 1);
}

#[rstest]
#[tokio::test]
async fn adding_the_same_user_twice_is_a_duplicate(#[future] seeded: Seeded) {
    let seeded = seeded.await;
    let again = Membership::join(seeded.household.id, seeded.owner.clone(), HouseholdRole::Viewer);
    let err = seeded.store.add(&again).await.expect_err("duplicate");
    assert!(matches!(err, MembershipRepositoryError::Duplicate { .. }));
}

#[rstest]
#[tokio::test]
async fn members_carry_profile_details(#[future] seeded: Seeded) {
    let seeded = seeded.await;
    let guest = user("guest@example.com");
    seeded.store.insert_user(guest.clone());
    let membership = Membership::join(seeded.household.id, guest.id().clone(), HouseholdRole::Viewer);
    seeded.store.add(&membership).await.expect("add");

    let members = seeded
        .store
        .list_members(&seeded.household.id)
        .await
        .expect("members");
    assert_eq!(members.len(), 2);
    let last = members.last().expect("guest");
    assert_eq!(last.email.as_ref(), "guest@example.com");
    assert_eq!(last.membership.role, HouseholdRole::Viewer);
}

#[rstest]
#[tokio::test]
async fn allergen_names_are_unique_per_household(#[future] seeded: Seeded) {
    let seeded = seeded.await;
    let name = AllergenName::new("Peanut").expect("name");
    AllergenRepository::create(&seeded.store, &Allergen::new(seeded.household.id, name.clone()))
        .await
        .expect("first");
    let err = AllergenRepository::create(&seeded.store, &Allergen::new(seeded.household.id, name))
        .await
        .expect_err("second");
    assert!(matches!(err, AllergenRepositoryError::Duplicate { .. }));
}

#[rstest]
#[tokio::test]
async fn renaming_a_location_onto_a_sibling_conflicts(#[future] seeded: Seeded) {
    let seeded = seeded.await;
    let pantry = Location::create(
        seeded.household.id,
        LocationDraft::new("Pantry", None, None).expect("draft"),
    );
    let mut fridge = Location::create(
        seeded.household.id,
        LocationDraft::new("Fridge", None, None).expect("draft"),
    );
    LocationRepository::create(&seeded.store, &pantry).await.expect("pantry");
    LocationRepository::create(&seeded.store, &fridge).await.expect("fridge");

    fridge.name = pantry.name.clone();
    let err = LocationRepository::update(&seeded.store, &fridge)
        .await
        .expect_err("conflict");
    assert!(matches!(err, LocationRepositoryError::Duplicate { .. }));
}

#[rstest]
#[tokio::test]
async fn deleting_a_location_detaches_its_items(#[future] seeded: Seeded) {
    let seeded = seeded.await;
    let shelf = Location::create(
        seeded.household.id,
        LocationDraft::new("Shelf", None, None).expect("draft"),
    );
    LocationRepository::create(&seeded.store, &shelf).await.expect("shelf");
    let mut rice = item(&seeded, "Rice", None);
    rice.location_id = Some(shelf.id);
    InventoryRepository::create(&seeded.store, &rice).await.expect("rice");

    assert!(LocationRepository::delete(&seeded.store, &shelf.id).await.expect("delete"));
    let stored = InventoryRepository::find(&seeded.store, &rice.id)
        .await
        .expect("find")
        .expect("item survives");
    assert_eq!(stored.location_id, None);
}

#[rstest]
#[tokio::test]
async fn deleting_a_household_cascades(#[future] seeded: Seeded) {
    let seeded = seeded.await;
    let rice = item(&seeded, "Rice", None);
    InventoryRepository::create(&seeded.store, &rice).await.expect("rice");

    assert!(HouseholdRepository::delete(&seeded.store, &seeded.household.id)
        .await
        .expect("delete"));
    assert!(InventoryRepository::find(&seeded.store, &rice.id)
        .await
        .expect("find")
        .is_none());
    assert!(seeded
        .store
        .find_role(&seeded.household.id, &seeded.owner)
        .await
        .expect("role")
        .is_none());
}

#[rstest]
#[tokio::test]
async fn item_listing_sorts_filters_and_pages(#[future] seeded: Seeded) {
    let seeded = seeded.await;
    let date = |day| NaiveDate::from_ymd_opt(2026, 3, day);
    for (name, expires) in [
        ("Milk", date(2)),
        ("Bread", None),
        ("Butter", date(1)),
        ("Cheese", date(9)),
    ] {
        InventoryRepository::create(&seeded.store, &item(&seeded, name, expires))
            .await
            .expect("item");
    }

    let query = ItemQuery {
        page: PageRequest::new(Some(1), Some(2), PageLimits::new(20, 100)).expect("page"),
        sort_by: ItemSortField::ExpirationDate,
        sort_order: SortOrder::Asc,
        ..ItemQuery::default()
    };
    let page = InventoryRepository::list(&seeded.store, &seeded.household.id, &query)
        .await
        .expect("list");
    let names: Vec<&str> = page.items.iter().map(|item| item.name.as_ref()).collect();
    assert_eq!(names, ["Butter", "Milk"]);
    assert_eq!(page.total, 4);

    let search = ItemQuery {
        search: Some("BUT".to_owned()),
        ..ItemQuery::default()
    };
    let page = InventoryRepository::list(&seeded.store, &seeded.household.id, &search)
        .await
        .expect("search");
    assert_eq!(page.total, 1);
}
