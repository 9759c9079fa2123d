use e2e::{browser::Browser, test_server::TestServer};

#[tokio::test]
async fn test_tryon_page_shows_the_first_step() {
    let server = TestServer::start()
        .await
        .expect("Failed to start test server");

    let browser = Browser::launch().expect("Failed to launch browser");
    let page = browser.new_page().expect("Failed to create page");

    page.goto(&format!("{}/try-on", server.url()))
        .expect("Failed to navigate");

    // The stepper and the first upload slot are rendered before any
    // interaction happens.
    let result = page.find_element(".stepper");
    assert!(result.is_ok(), "Stepper should exist");

    let result = page.find_element("#fitroom_user_file");
    assert!(result.is_ok(), "User photo input should exist");
}
