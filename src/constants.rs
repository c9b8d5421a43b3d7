pub mod session {

    pub const CSRF_TOKEN_KEY: &str = "csrf_token";

    pub const USER_ID_KEY: &str = "user_id";

    pub const INACTIVITY_MINUTES: i64 = 60;
}

pub mod permissions {

    /// Grants every permission; the administrator template holds it.
    pub const SUPERUSER: &str = "user_is_ueberuser";

    pub const USER_ADD_NEW: &str = "user_add_new";

    /// Seeded permission vocabulary as `(name, description)`.
    pub const ITEMS: &[(&str, &str)] = &[
        (SUPERUSER, "User has full access. God-like. Redeemer."),
        ("user_view_others", "User is allowed to see other users and their details."),
        (USER_ADD_NEW, "User is allowed to add new users."),
        ("user_edit_own", "User is allowed to edit their own details."),
        ("user_edit_others", "User is allowed to edit other users."),
        ("user_passwd_edit_others", "User is allowed to edit the password of other users."),
        ("user_edit_templ_perm", "User is allowed to change the permission template that is assigned to a user."),
        ("templ_perm_add", "User is allowed to add new permission templates."),
        ("templ_perm_edit", "User is allowed to edit existing permission templates."),
        ("zone_master_add", "User is allowed to add new master zones."),
        ("zone_slave_add", "User is allowed to add new slave zones."),
        ("zone_content_view_own", "User is allowed to see the content and meta data of zones they own."),
        ("zone_content_view_others", "User is allowed to see the content and meta data of zones they do not own."),
        ("zone_content_edit_own", "User is allowed to edit the content of zones they own."),
        ("zone_content_edit_others", "User is allowed to edit the content of zones they do not own."),
        ("zone_meta_edit_own", "User is allowed to edit the meta data of zones they own."),
        ("zone_meta_edit_others", "User is allowed to edit the meta data of zones they do not own."),
        ("search", "User is allowed to perform searches."),
        ("supermaster_view", "User is allowed to view supermasters."),
        ("supermaster_add", "User is allowed to add new supermasters."),
        ("supermaster_edit", "User is allowed to edit supermasters."),
        ("zone_templ_add", "User is allowed to add new zone templates."),
        ("zone_templ_edit", "User is allowed to edit existing zone templates."),
    ];
}

pub mod registration {

    pub const DEFAULT_PREFERRED_TEMPLATES: &[&str] = &["User", "Zone Manager", "Read Only"];

    pub const GUEST_DESCRIPTION: &str = "User registered via public registration form";

    pub const SUCCESS_QUERY: &str = "registered=1";
}

pub mod limits {

    pub const RECENT_ZONES: u64 = 5;

    pub const MAX_USERNAME_LENGTH: usize = 64;
}
