use menu_tiles::roles::*;
use menu_tiles::{AllowListFeature, MenuTile, TileCatalogue};

const ALL_ROLES: [&str; 10] = [
    MAINTAIN_ACCESS_ROLES,
    MAINTAIN_ACCESS_ROLES_ADMIN,
    CREATE_USER,
    MAINTAIN_EMAIL_DOMAINS,
    MAINTAIN_OAUTH_USERS,
    AUTH_GROUP_MANAGER,
    ROLES_ADMIN,
    VIEW_ADMINISTRABLE_USER_ROLES,
    MANAGE_USER_ALLOW_LIST,
    CONTRACT_MANAGER_VIEW_GROUP,
];

fn enabled() -> TileCatalogue {
    TileCatalogue::new(&AllowListFeature::new(true, "Test"))
}

fn tile(title: &str, description: &str, href: &str, data_qa: &str) -> MenuTile {
    MenuTile {
        title: title.to_string(),
        description: description.to_string(),
        href: href.to_string(),
        data_qa: data_qa.to_string(),
    }
}

fn subsets() -> impl Iterator<Item = Vec<&'static str>> {
    (0u32..(1 << ALL_ROLES.len())).map(|mask| {
        ALL_ROLES
            .iter()
            .enumerate()
            .filter(|(idx, _)| mask & (1 << idx) != 0)
            .map(|(_, role)| *role)
            .collect()
    })
}

#[test]
fn create_user_sees_create_dps_user_tile() {
    let tiles = enabled().tiles_for_roles([CREATE_USER]);
    assert_eq!(
        tiles,
        vec![tile(
            "Create a DPS user",
            "Create an account for a DPS user",
            "/create-user",
            "create_dps_user_link",
        )]
    );
}

#[test]
fn maintain_email_domains_sees_email_domain_tile() {
    let tiles = enabled().tiles_for_roles([MAINTAIN_EMAIL_DOMAINS]);
    assert_eq!(
        tiles,
        vec![tile(
            "Manage Email Domains",
            "Create, Delete and View email domain listing",
            "/email-domains",
            "view_email_domains_link",
        )]
    );
}

#[test]
fn contract_manager_sees_crs_download_tile() {
    let tiles = enabled().tiles_for_roles([CONTRACT_MANAGER_VIEW_GROUP]);
    assert_eq!(
        tiles,
        vec![tile(
            "Download CRS Group members",
            "Select CRS Group and download list of members",
            "/crs-group-selection",
            "view_crs_group_users_link",
        )]
    );
}

#[test]
fn maintain_oauth_users_sees_four_external_user_tiles() {
    let tiles = enabled().tiles_for_roles([MAINTAIN_OAUTH_USERS]);
    assert_eq!(
        tiles,
        vec![
            tile(
                "Search for an external user",
                "Search for users that typically do not have a DPS or Delius account",
                "/search-external-users",
                "maintain_auth_users_link",
            ),
            tile(
                "Create an external user",
                "Create an account for people who do not have a DPS or Delius account",
                "/create-external-user",
                "create_auth_user_link",
            ),
            tile(
                "View the groups I administer",
                "View and make changes to a group which contain users outside of HMPPS",
                "/manage-groups",
                "manage_groups_link",
            ),
            tile(
                "Create a group",
                "Create a new group which will represent a cohort of users outside of HMPPS",
                "/manage-groups/create-group",
                "create_groups_link",
            ),
        ]
    );
}

#[test]
fn auth_group_manager_cannot_create_groups() {
    let tiles = enabled().tiles_for_roles([AUTH_GROUP_MANAGER]);
    let hrefs: Vec<&str> = tiles.iter().map(|tile| tile.href.as_str()).collect();
    assert_eq!(
        hrefs,
        vec!["/search-external-users", "/create-external-user", "/manage-groups"]
    );
}

#[test]
fn view_administrable_user_roles_sees_view_roles_only() {
    let tiles = enabled().tiles_for_roles([VIEW_ADMINISTRABLE_USER_ROLES]);
    assert_eq!(
        tiles,
        vec![tile(
            "View roles",
            "View roles that are available to be assigned to users",
            "/manage-roles",
            "view_roles_link",
        )]
    );
}

#[test]
fn combined_roles_resolve_to_eight_ordered_tiles() {
    let tiles = enabled().tiles_for_roles([
        MAINTAIN_OAUTH_USERS,
        ROLES_ADMIN,
        MANAGE_USER_ALLOW_LIST,
    ]);
    let hrefs: Vec<&str> = tiles.iter().map(|tile| tile.href.as_str()).collect();
    assert_eq!(
        hrefs,
        vec![
            "/search-external-users",
            "/create-external-user",
            "/manage-groups",
            "/manage-groups/create-group",
            "/manage-roles",
            "/manage-roles/create-role",
            "/user-allow-list",
            "/user-allow-list/add",
        ]
    );
}

#[test]
fn every_role_combination_is_ordered_unique_and_role_justified() {
    for feature in [true, false] {
        let catalogue = TileCatalogue::new(&AllowListFeature::new(feature, "Dev"));
        for roles in subsets() {
            let tiles = catalogue.tiles_for_roles(&roles);

            let orders: Vec<u32> = tiles
                .iter()
                .map(|tile| {
                    catalogue
                        .entries()
                        .iter()
                        .find(|entry| entry.title == tile.title)
                        .expect("resolved tile comes from catalogue")
                        .order
                })
                .collect();
            assert!(orders.windows(2).all(|pair| pair[0] < pair[1]), "{roles:?}");

            for entry in catalogue.entries() {
                let granted = roles.iter().any(|role| entry.eligibility.admits(role));
                let count = tiles.iter().filter(|tile| tile.title == entry.title).count();
                assert_eq!(count, usize::from(granted), "{} for {roles:?}", entry.title);
            }
        }
    }
}

#[test]
fn reversing_roles_does_not_change_result() {
    let catalogue = enabled();
    for roles in subsets() {
        let mut reversed = roles.clone();
        reversed.reverse();
        assert_eq!(
            catalogue.tiles_for_roles(&roles),
            catalogue.tiles_for_roles(&reversed)
        );
    }
}
