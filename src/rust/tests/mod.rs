mod test_handlers;
