mod db_tests;
