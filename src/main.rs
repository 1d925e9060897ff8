use pokegen::rocket_initialize;

#[rocket::launch]
fn rocket() -> _ {
    rocket_initialize()
}
